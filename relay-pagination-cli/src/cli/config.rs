use anyhow::Context;
use relay_pagination::PaginationConfig;
use relay_pagination_tracing::TracingConfig;
use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::records::RecordsConfig;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

impl Config {
    pub fn load_config(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        let config = if let Some(config_path) = path {
            let config_file =
                std::fs::read_to_string(config_path).context("Couldn't read config file")?;
            Self::from_yaml(&config_file)?
        } else {
            eprintln!("No config file provided, using default config.");
            Config::default()
        };
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Couldn't parse config file")
    }
}
