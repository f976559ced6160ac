//! Run configuration

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::types::*;

/// Directory read when none is given
pub const DEFAULT_TARGET_DIR: &str = "storage";

/// How the report is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Numbered lines, one message per line
    #[default]
    Text,
    /// The full report as pretty-printed JSON
    Json,
}

/// Everything one audit run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Directory holding the EOB and check files
    pub target_dir: PathBuf,
    /// Grand total the records are expected to add up to
    pub expected_total: BigDecimal,
    pub format: OutputFormat,
}

impl AuditConfig {
    /// Create a config for the default directory
    pub fn new(expected_total: BigDecimal) -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            expected_total,
            format: OutputFormat::Text,
        }
    }

    /// Build a validated config from raw command-line values
    pub fn from_args(total: &str, target_dir: PathBuf, format: OutputFormat) -> EobResult<Self> {
        let config = Self::new(parse_total(total)?)
            .with_target_dir(target_dir)
            .with_format(format);
        config.validate()?;
        Ok(config)
    }

    pub fn with_target_dir(mut self, target_dir: impl Into<PathBuf>) -> Self {
        self.target_dir = target_dir.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// A zero or negative expected total means none was supplied
    pub fn validate(&self) -> EobResult<()> {
        if self.expected_total <= BigDecimal::from(0) {
            return Err(EobError::Config(format!(
                "expected total must be positive, got {}",
                self.expected_total
            )));
        }
        Ok(())
    }
}

/// Parse a decimal total such as `100.50` exactly, without going through floats
pub fn parse_total(text: &str) -> EobResult<BigDecimal> {
    BigDecimal::from_str(text.trim())
        .map_err(|_| EobError::Config(format!("'{text}' is not a decimal total")))
}
