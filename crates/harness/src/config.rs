//! Harness run configuration.
//!
//! Defaults reproduce the classic self-test: checksum the pangram, observe
//! gamepads for three seconds, pulse, linger for two seconds, shut down.
//! A YAML or JSON file may override any field; command-line flags override
//! the file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::hex::parse_report;

pub const DEFAULT_MESSAGE: &str = "The quick brown fox jumps over the lazy dog";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Text checksummed before the observer starts.
    pub message: String,
    /// Time given to the observer to find gamepads before the pulse.
    pub settle_ms: u64,
    /// Time the observer keeps running after the pulse.
    pub linger_ms: u64,
    pub poll_interval_ms: u64,
    /// Raw output report, hex encoded, report ID first. No pulse when unset.
    pub output_report: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            settle_ms: 3000,
            linger_ms: 2000,
            poll_interval_ms: 250,
            output_report: None,
        }
    }
}

impl HarnessConfig {
    /// Loads a config file; `.json` files are read as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let config: Self = if is_json {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.poll_interval_ms == 0 {
            return Err(HarnessError::InvalidConfiguration(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        self.output_report_bytes()?;
        Ok(())
    }

    pub fn output_report_bytes(&self) -> Result<Option<Vec<u8>>, HarnessError> {
        self.output_report.as_deref().map(parse_report).transpose()
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
