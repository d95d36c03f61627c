//! Engine-wide configuration
//!
//! Groups the selection, scan, backtest and Monte Carlo settings so a caller
//! can keep them in one JSON file. Missing sections and fields take their
//! defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::CCResult;
use crate::scan::ScanConfig;
use crate::selection::SelectionConfig;
use crate::simulation::{BacktestConfig, MonteCarloConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Thresholds for direct contract selection
    pub selection: SelectionConfig,
    pub scan: ScanConfig,
    pub backtest: BacktestConfig,
    pub monte_carlo: MonteCarloConfig,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> CCResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> CCResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Write as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> CCResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> CCResult<()> {
        self.backtest.validate()?;
        self.monte_carlo.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CCError, SelectionMode};
    use tempfile::tempdir;

    #[test]
    fn test_partial_json_takes_defaults() {
        let json = r#"{
            "selection": { "min_open_interest": 1, "min_volume": 0, "atm_tolerance": 0.05 },
            "scan": { "mode": "both" },
            "monte_carlo": { "n_paths": 500, "seed": 7 }
        }"#;
        let config = EngineConfig::from_json_str(json).unwrap();

        assert_eq!(config.selection, SelectionConfig::relaxed());
        assert_eq!(config.scan.mode, SelectionMode::Both);
        assert!(config.scan.include_earnings_before_expiry);
        assert_eq!(config.monte_carlo.n_paths, 500);
        assert_eq!(config.monte_carlo.weeks, 52);
        assert_eq!(config.backtest, BacktestConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let json = r#"{ "backtest": { "strike_step": 0.0 } }"#;
        assert!(matches!(
            EngineConfig::from_json_str(json),
            Err(CCError::InvalidInput(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(CCError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.json");

        let mut config = EngineConfig::default();
        config.backtest.vol_window = 10;
        config.scan.mode = SelectionMode::Itm;
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        assert!(matches!(
            EngineConfig::load(dir.path().join("missing.json")),
            Err(CCError::IO(_))
        ));
    }
}
