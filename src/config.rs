use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use space_search_core::history::MAX_PAGE_SIZE;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON file in the `collection.items` format.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_query_chars: default_max_query_chars(),
        }
    }
}

fn default_max_query_chars() -> usize {
    500
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    #[serde(default)]
    pub seed_demo: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            seed_demo: false,
        }
    }
}

fn default_page_size() -> usize {
    10
}
fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if config.search.max_query_chars == 0 {
        anyhow::bail!("search.max_query_chars must be > 0");
    }

    let history = &config.history;
    if !(1..=MAX_PAGE_SIZE).contains(&history.max_page_size) {
        anyhow::bail!("history.max_page_size must be in [1, {}]", MAX_PAGE_SIZE);
    }
    if !(1..=history.max_page_size).contains(&history.default_page_size) {
        anyhow::bail!(
            "history.default_page_size must be in [1, {}]",
            history.max_page_size
        );
    }

    Ok(())
}
