use std::path::Path;

use mosaic_config::Config;

/// Load the JSON config at `path`, or environment-adjusted defaults when
/// no path is given or the file does not exist
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) if path.exists() => {
            tracing::info!("Loading config from {}", path.display());
            Config::from_path(path)
        }
        Some(path) => {
            tracing::warn!("Config {} not found, using defaults", path.display());
            Ok(Config::new())
        }
        None => Ok(Config::new()),
    }
}
