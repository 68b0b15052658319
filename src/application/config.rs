//! Runtime configuration for the engine and the desktop front end.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{ImportMode, StepStrategy};
use crate::error::{LifeError, LifeResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub rows: usize,
    pub cols: usize,

    /// Edge length of one cell in pixels
    pub unit_size: f32,

    /// Treat the board as a torus
    pub wrap: bool,

    /// Milliseconds between generations while running
    pub tick_period_ms: u64,

    pub show_grid_lines: bool,

    pub strategy: StepStrategy,

    pub import_mode: ImportMode,

    /// Where the front end saves and opens boards
    pub save_path: PathBuf,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            unit_size: 10.0,
            wrap: false,
            tick_period_ms: 100,
            show_grid_lines: true,
            strategy: StepStrategy::Serial,
            import_mode: ImportMode::Strict,
            save_path: PathBuf::from("board.gol"),
        }
    }
}

impl LifeConfig {
    /// Defaults, then the JSON file named by `LIFE_CONFIG`, then
    /// individual `LIFE_*` variables. Unparsable variables are ignored.
    pub fn from_env() -> LifeResult<Self> {
        let mut config = match std::env::var("LIFE_CONFIG") {
            Ok(path) => Self::from_json_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> LifeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> LifeResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply `LIFE_ROWS`, `LIFE_COLS`, `LIFE_WRAP`, `LIFE_TICK_MS` and
    /// `LIFE_UNIT_SIZE` from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("LIFE_ROWS").and_then(|s| s.parse().ok()) {
            self.rows = v;
        }
        if let Some(v) = lookup("LIFE_COLS").and_then(|s| s.parse().ok()) {
            self.cols = v;
        }
        if let Some(v) = lookup("LIFE_WRAP").and_then(|s| s.parse().ok()) {
            self.wrap = v;
        }
        if let Some(v) = lookup("LIFE_TICK_MS").and_then(|s| s.parse().ok()) {
            self.tick_period_ms = v;
        }
        if let Some(v) = lookup("LIFE_UNIT_SIZE").and_then(|s| s.parse().ok()) {
            self.unit_size = v;
        }
    }

    pub fn validate(&self) -> LifeResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(self.unit_size.is_finite() && self.unit_size > 0.0) {
            return Err(LifeError::config(format!(
                "unit_size must be positive, got {}",
                self.unit_size
            )));
        }
        if self.tick_period_ms == 0 {
            return Err(LifeError::config("tick_period_ms must be non-zero"));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_is_valid() {
        let config = LifeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LifeConfig::from_json_str(r#"{"rows": 12, "wrap": true, "strategy": "parallel"}"#)
            .unwrap();
        assert_eq!(config.rows, 12);
        assert!(config.wrap);
        assert_eq!(config.strategy, StepStrategy::Parallel);
        assert_eq!(config.cols, 50);
        assert_eq!(config.import_mode, ImportMode::Strict);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(
            LifeConfig::from_json_str("{rows: }"),
            Err(LifeError::Json(_))
        ));
    }

    #[test]
    fn test_overrides_ignore_unparsable() {
        let vars: HashMap<&str, &str> = [
            ("LIFE_ROWS", "30"),
            ("LIFE_COLS", "lots"),
            ("LIFE_WRAP", "true"),
            ("LIFE_TICK_MS", "250"),
        ]
        .into_iter()
        .collect();

        let mut config = LifeConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.rows, 30);
        assert_eq!(config.cols, 50);
        assert!(config.wrap);
        assert_eq!(config.tick_period_ms, 250);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = LifeConfig { rows: 0, ..LifeConfig::default() };
        assert!(matches!(config.validate(), Err(LifeError::InvalidDimensions { .. })));

        let config = LifeConfig { unit_size: 0.0, ..LifeConfig::default() };
        assert!(matches!(config.validate(), Err(LifeError::Config(_))));

        let config = LifeConfig { tick_period_ms: 0, ..LifeConfig::default() };
        assert!(config.validate().is_err());
    }
}
