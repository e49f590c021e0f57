//! Catalog loading and the `space-search sources` / `space-search get`
//! commands.

use anyhow::{bail, Context, Result};
use std::path::Path;

use space_search_core::Catalog;

use crate::config::Config;

/// Reads and parses the catalog file at `path`.
///
/// Used by the server at startup and by every offline CLI command. Any
/// failure here is fatal: the caller never gets a partial catalog.
///
/// # Arguments
///
/// - `path` — JSON file with the nested `collection.items[]` shape.
///
/// # Returns
///
/// The loaded [`Catalog`], or an error naming the path when the file is
/// unreadable or malformed.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    Catalog::from_json_str(&content)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))
}

/// Prints every catalog record as an `ID / TYPE / DATE / NAME` table.
pub fn list_sources(config: &Config) -> Result<()> {
    let catalog = load_catalog(&config.catalog.path)?;

    if catalog.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    println!("{:<6} {:<8} {:<22} NAME", "ID", "TYPE", "DATE");
    for record in catalog.all() {
        println!(
            "{:<6} {:<8} {:<22} {}",
            record.id,
            record.kind,
            if record.launch_date.is_empty() {
                "-"
            } else {
                record.launch_date.as_str()
            },
            record.name
        );
    }
    println!();
    println!("{} sources", catalog.len());

    Ok(())
}

/// Prints a single catalog record in full.
///
/// # Arguments
///
/// - `config` — application configuration; only `[catalog].path` is read.
/// - `id` — the record's 1-based catalog id.
///
/// # Returns
///
/// `Ok(())` once the record is printed, or a `source not found` error when
/// no record has that id.
pub fn run_get(config: &Config, id: u64) -> Result<()> {
    let catalog = load_catalog(&config.catalog.path)?;
    let record = match catalog.get(id) {
        Some(r) => r,
        None => bail!("source not found: {}", id),
    };

    println!("--- Source ---");
    println!("id:          {}", record.id);
    println!("name:        {}", record.name);
    println!("type:        {}", record.kind);
    if !record.launch_date.is_empty() {
        println!("date:        {}", record.launch_date);
    }
    println!("status:      {}", record.status);
    if let Some(ref url) = record.image_url {
        println!("image_url:   {}", url);
    }
    println!();

    println!("--- Description ---");
    if record.description.is_empty() {
        println!("(none)");
    } else {
        println!("{}", record.description);
    }

    Ok(())
}
