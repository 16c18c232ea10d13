//! Configuration loader.
//!
//! Reads `ikarus.toml` and deserializes it into [`IkarusConfig`]. Falls back
//! to defaults when the file is missing or malformed, so the relay always
//! starts.

use std::path::Path;

use ikarus_types::config::IkarusConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ikarus.toml";

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`IkarusConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_config(path: &Path) -> IkarusConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return IkarusConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return IkarusConfig::default();
        }
    };

    match toml::from_str::<IkarusConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            IkarusConfig::default()
        }
    }
}
