use serde::{Deserialize, Serialize};

fn default_max_in_flight() -> usize {
    8
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ImagesConfig {
    /// Concurrent image downloads during a fetch
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
        }
    }
}
