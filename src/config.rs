//! Report configuration
//!
//! Defaults reproduce the experiment dashboard layout: pivot header
//! `trialName,Status,...` and second-resolution `YYYY-MM-DDTHH:MM:SS` times.
//! Configs deserialize from JSON with missing fields defaulted. Every
//! constructor validates, so a `ReportConfig` in hand is always usable.

use serde::{Deserialize, Serialize};

use crate::timestamp::{validate_format, DEFAULT_TIME_FORMAT};
use crate::{Error, Result};

/// Default label of the pivot table's trial-id header cell.
pub const DEFAULT_TRIAL_NAME_HEADER: &str = "trialName";

/// Default label of the pivot table's lifecycle-state header cell.
pub const DEFAULT_STATUS_HEADER: &str = "Status";

/// Settings shared by the pivot and time-series builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReportConfigFields")]
pub struct ReportConfig {
    trial_name_header: String,
    status_header: String,
    time_format: String,
}

/// Unvalidated wire form of [`ReportConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct ReportConfigFields {
    trial_name_header: String,
    status_header: String,
    time_format: String,
}

impl Default for ReportConfigFields {
    fn default() -> Self {
        let ReportConfig {
            trial_name_header,
            status_header,
            time_format,
        } = ReportConfig::default();
        Self {
            trial_name_header,
            status_header,
            time_format,
        }
    }
}

impl TryFrom<ReportConfigFields> for ReportConfig {
    type Error = Error;

    fn try_from(fields: ReportConfigFields) -> Result<Self> {
        let config = Self {
            trial_name_header: fields.trial_name_header,
            status_header: fields.status_header,
            time_format: fields.time_format,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            trial_name_header: DEFAULT_TRIAL_NAME_HEADER.to_string(),
            status_header: DEFAULT_STATUS_HEADER.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl ReportConfig {
    /// Create a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Label of the trial-id header cell.
    #[must_use]
    pub fn trial_name_header(&self) -> &str {
        &self.trial_name_header
    }

    /// Label of the lifecycle-state header cell.
    #[must_use]
    pub fn status_header(&self) -> &str {
        &self.status_header
    }

    /// strftime layout of normalized timestamps.
    #[must_use]
    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Check labels are non-empty and the time layout is well formed and
    /// second-resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.trial_name_header.is_empty() {
            return Err(Error::InvalidInput(
                "trial_name_header must not be empty".to_string(),
            ));
        }
        if self.status_header.is_empty() {
            return Err(Error::InvalidInput(
                "status_header must not be empty".to_string(),
            ));
        }
        validate_format(&self.time_format)
    }
}

/// Builder for `ReportConfig`.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Set the trial-id header label.
    #[must_use]
    pub fn trial_name_header(mut self, label: impl Into<String>) -> Self {
        self.config.trial_name_header = label.into();
        self
    }

    /// Set the lifecycle-state header label.
    #[must_use]
    pub fn status_header(mut self, label: impl Into<String>) -> Self {
        self.config.status_header = label.into();
        self
    }

    /// Set the normalized timestamp layout.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.config.time_format = format.into();
        self
    }

    /// Build and validate the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if validation fails.
    pub fn build(self) -> Result<ReportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
