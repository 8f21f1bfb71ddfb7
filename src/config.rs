//! Application configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the rendering thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Target frame rate of the render loop in Hz.
    pub frame_rate_hz: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { frame_rate_hz: 60 }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderConfig,

    /// Default tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info,flowvis=debug".to_string()
}

impl AppConfig {
    /// Load the configuration from a TOML file, falling back to defaults on
    /// any error (missing file, parse error).
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(?path, error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.render.frame_rate_hz, 60);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowvis.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "log_filter = \"debug\"\n\n[render]\nframe_rate_hz = 30").unwrap();

        let config = AppConfig::load_or_default(&path);
        assert_eq!(config.render.frame_rate_hz, 30);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = AppConfig::load_or_default("/nonexistent/flowvis.toml");
        assert_eq!(config.render.frame_rate_hz, 60);
    }
}
