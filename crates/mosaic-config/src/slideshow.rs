use serde::{Deserialize, Serialize};

fn default_interval_ms() -> u64 {
    2000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Delay between two swaps
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Fixed RNG seed, OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            seed: None,
        }
    }
}
