//! Host configuration from the environment

use std::path::PathBuf;

use hongzhi_config::{DisplayConfig, EngineConfig};
use tracing::info;

use crate::error::AppError;

/// Catalog entry opened when `HONGZHI_BASE` is not set
pub const DEFAULT_BASE: &str = "circle_base";

/// Export path used when `HONGZHI_OUTPUT` is not set
pub const DEFAULT_OUTPUT: &str = "hongzhi.png";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Catalog id of the template or paper to open
    pub base: String,
    /// Font used for skeleton templates
    pub font_path: Option<PathBuf>,
    /// Where the final buffer is written
    pub output: PathBuf,
    /// Container layout until the host reports one
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Read `HONGZHI_CONFIG`, `HONGZHI_BASE`, `HONGZHI_FONT` and
    /// `HONGZHI_OUTPUT` from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let engine = match var("HONGZHI_CONFIG") {
            Some(path) => {
                info!("Loading engine config from {}", path);
                EngineConfig::from_json_slice(&std::fs::read(&path)?)?
            }
            None => EngineConfig::default(),
        };
        Ok(Self {
            engine,
            base: var("HONGZHI_BASE").unwrap_or_else(|| DEFAULT_BASE.to_string()),
            font_path: var("HONGZHI_FONT").map(PathBuf::from),
            output: PathBuf::from(var("HONGZHI_OUTPUT").unwrap_or_else(|| DEFAULT_OUTPUT.to_string())),
            display: DisplayConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_vars(|_| None).unwrap();
        assert_eq!(config.base, DEFAULT_BASE);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(config.font_path.is_none());
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_vars(|key| match key {
            "HONGZHI_BASE" => Some("vertical_7".to_string()),
            "HONGZHI_OUTPUT" => Some("/tmp/out.png".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base, "vertical_7");
        assert_eq!(config.output, PathBuf::from("/tmp/out.png"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = AppConfig::from_vars(|key| {
            (key == "HONGZHI_CONFIG").then(|| "/nonexistent/hongzhi.json".to_string())
        });
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
