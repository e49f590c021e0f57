//! The `space-search search` command: run a query offline and print the
//! ranked results. Nothing is written to history.

use anyhow::Result;

use crate::config::Config;
use crate::sources::load_catalog;

pub fn run_search(config: &Config, query: &str, limit: Option<usize>) -> Result<()> {
    if query.chars().count() > config.search.max_query_chars {
        anyhow::bail!(
            "query is longer than {} characters",
            config.search.max_query_chars
        );
    }

    let catalog = load_catalog(&config.catalog.path)?;
    let results = space_search_core::search::search(&catalog, query.trim());

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let total = results.len();
    let shown = limit.unwrap_or(total).min(total);
    for (i, m) in results.iter().take(shown).enumerate() {
        println!(
            "{}. [{:.2}] {} (id {})",
            i + 1,
            m.confidence,
            m.record.name,
            m.record.id
        );
        if let Some(url) = &m.record.image_url {
            println!("    {}", url);
        }
    }
    if shown < total {
        println!("... {} more", total - shown);
    }
    println!();
    println!("{} results", total);

    Ok(())
}
