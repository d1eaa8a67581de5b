//! Report configuration, loaded from an optional YAML file.

use crate::error::ReportError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Log analyzed when no path is given on the command line.
pub const DEFAULT_LOG_PATH: &str = "strategy_evaluation/trading_vs_balanced.json";

/// Sample sizes, windows and the villages/resources singled out by the report.
///
/// Every key is optional in the YAML file; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub default_log_path: PathBuf,
    /// Buys and sells shown per village.
    pub trade_sample_size: usize,
    /// Number of leading auction clearings printed and averaged.
    pub auction_window: usize,
    /// Resources whose clearing prices are averaged, in display order.
    pub tracked_resources: Vec<String>,
    pub order_sample_size: usize,
    /// Villages whose worker allocations are shown, in display order.
    pub allocation_villages: Vec<String>,
    pub allocation_sample_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_log_path: PathBuf::from(DEFAULT_LOG_PATH),
            trade_sample_size: 3,
            auction_window: 10,
            tracked_resources: vec!["Wood".to_string(), "Food".to_string()],
            order_sample_size: 5,
            allocation_villages: vec!["village_a".to_string(), "village_b".to_string()],
            allocation_sample_size: 5,
        }
    }
}

impl ReportConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&contents)?;
        log::info!("Loaded report config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ReportError> {
        Ok(serde_yaml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_report_layout() {
        let config = ReportConfig::default();
        assert_eq!(config.trade_sample_size, 3);
        assert_eq!(config.auction_window, 10);
        assert_eq!(config.order_sample_size, 5);
        assert_eq!(config.allocation_sample_size, 5);
        assert_eq!(config.tracked_resources, vec!["Wood", "Food"]);
        assert_eq!(config.allocation_villages, vec!["village_a", "village_b"]);
        assert_eq!(config.default_log_path, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config =
            ReportConfig::from_yaml("auction_window: 3\nallocation_villages: [village_c]\n")
                .unwrap();
        assert_eq!(config.auction_window, 3);
        assert_eq!(config.allocation_villages, vec!["village_c"]);
        assert_eq!(config.trade_sample_size, 3);
        assert_eq!(config.tracked_resources, vec!["Wood", "Food"]);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = ReportConfig::from_yaml("auction_window: lots").unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }
}
