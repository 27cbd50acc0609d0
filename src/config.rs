use crate::model::navigation::Role;
use crate::table::state::{DEFAULT_PAGE_SIZES, DEFAULT_ROWS_PER_PAGE};
use crate::table::TableOptions;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding budget.json, disbursements.json and collections.csv
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub role: Role,
    /// Page sizes offered by every table
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_page_sizes() -> Vec<usize> {
    DEFAULT_PAGE_SIZES.to_vec()
}

fn default_rows_per_page() -> usize {
    DEFAULT_ROWS_PER_PAGE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            role: Role::default(),
            page_sizes: default_page_sizes(),
            rows_per_page: default_rows_per_page(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".treasury-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ignoring invalid {}: {}", config_path.display(), e);
                None
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Table options seeded from the page size settings. A default page
    /// size that is not offered falls back to the nearest offered one.
    pub fn table_options(&self) -> TableOptions {
        let page_sizes = if self.page_sizes.iter().any(|&s| s > 0) {
            self.page_sizes.iter().copied().filter(|&s| s > 0).collect()
        } else {
            default_page_sizes()
        };
        let rows_per_page =
            crate::table::state::nearest_page_size(&page_sizes, self.rows_per_page)
                .unwrap_or(DEFAULT_ROWS_PER_PAGE);

        TableOptions {
            page_sizes,
            rows_per_page,
            ..TableOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"role": "Treasurer"}"#).unwrap();
        assert_eq!(config.role, Role::Treasurer);
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.page_sizes, vec![5, 10, 25, 50]);
        assert_eq!(config.rows_per_page, 10);
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            data_dir: "/srv/treasury".to_string(),
            role: Role::Viewer,
            page_sizes: vec![20, 40],
            rows_per_page: 20,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_table_options_repair_bad_page_sizes() {
        let config = Config {
            page_sizes: vec![0, 15, 30],
            rows_per_page: 20,
            ..Config::default()
        };
        let options = config.table_options();
        assert_eq!(options.page_sizes, vec![15, 30]);
        assert_eq!(options.rows_per_page, 15);

        let config = Config {
            page_sizes: Vec::new(),
            ..Config::default()
        };
        assert_eq!(config.table_options().page_sizes, vec![5, 10, 25, 50]);
    }
}
