//! Generator configuration.

use crate::distribution::{check_probability, DefectRates};
use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable parameters of event generation.
///
/// Missing YAML keys fall back to the defaults below; unknown keys are
/// rejected.
///
/// ```yaml
/// null_rate: 0.05
/// orphan_rate: 0.03
/// unique_rate: 0.6
/// subscriber_pool: 12000
/// message_pool: 5000
/// lookback_minutes: 1440
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Share of rows with a NULL campaign id.
    pub null_rate: f64,
    /// Share of rows with a dangling campaign id.
    pub orphan_rate: f64,
    /// Probability that an OPEN or CLICK event is flagged unique.
    pub unique_rate: f64,
    /// Subscriber keys are drawn from `sub_1..=sub_<subscriber_pool>`.
    pub subscriber_pool: u32,
    /// Message ids are drawn from `msg_1..=msg_<message_pool>`.
    pub message_pool: u32,
    /// Timestamps fall within this many minutes before generation time.
    pub lookback_minutes: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            null_rate: 0.05,
            orphan_rate: 0.03,
            unique_rate: 0.6,
            subscriber_pool: 12_000,
            message_pool: 5_000,
            lookback_minutes: 24 * 60,
        }
    }
}

impl GeneratorConfig {
    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, GeneratorError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Replace both defect rates.
    pub fn with_rates(mut self, null_rate: f64, orphan_rate: f64) -> Self {
        self.null_rate = null_rate;
        self.orphan_rate = orphan_rate;
        self
    }

    /// Check every setting, returning the validated defect thresholds.
    pub fn validate(&self) -> Result<DefectRates, GeneratorError> {
        let rates = DefectRates::new(self.null_rate, self.orphan_rate)?;
        check_probability("unique_rate", self.unique_rate)?;

        if self.subscriber_pool == 0 {
            return Err(GeneratorError::InvalidConfig(
                "subscriber_pool must be at least 1".to_string(),
            ));
        }
        if self.message_pool == 0 {
            return Err(GeneratorError::InvalidConfig(
                "message_pool must be at least 1".to_string(),
            ));
        }
        if self.lookback_minutes == 0 {
            return Err(GeneratorError::InvalidConfig(
                "lookback_minutes must be at least 1".to_string(),
            ));
        }

        Ok(rates)
    }
}
