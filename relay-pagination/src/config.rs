use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::cursor::CursorPolicy;

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    #[builder(default)]
    pub cursor_policy: CursorPolicy,
    /// Runs an extra `count` round trip to fill in `total_count`.
    #[builder(default)]
    pub include_total_count: bool,
}

impl PaginationConfig {
    pub fn builder() -> PaginationConfigBuilder {
        PaginationConfigBuilder::default()
    }
}
