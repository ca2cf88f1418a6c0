#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

use serde::{Deserialize, Serialize};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing::*;

const DEFAULT_FILTER: &str = "info,relay_pagination=info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub service_name: String,
    pub format: LogFormat,
    /// Used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "dev".to_string(),
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

/// Installs the global subscriber. Events go to stderr so stdout stays free
/// for command output.
pub fn init_tracer(config: TracingConfig) -> anyhow::Result<()> {
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;
    let registry = tracing_subscriber::registry().with(filter_layer);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
    }
    tracing::debug!(service_name = %config.service_name, "tracing initialized");

    Ok(())
}
