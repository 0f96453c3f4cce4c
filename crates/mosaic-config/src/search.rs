use mosaic_types::Category;
use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://itunes.apple.com/search".to_string()
}

fn default_term() -> String {
    "daft punk".to_string()
}

fn default_limit() -> u32 {
    200
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Search endpoint and request defaults
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_term")]
    pub default_term: String,
    #[serde(default)]
    pub default_category: Category,
    /// Number of results asked from the endpoint
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_term: default_term(),
            default_category: Category::default(),
            limit: default_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
