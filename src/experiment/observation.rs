//! Observation - raw metric reports from a trial

use serde::{Deserialize, Serialize};

/// A single reported (metric, timestamp, value) fact from a trial.
///
/// All fields are kept as text exactly as the metrics collector reported
/// them:
/// - `timestamp` is RFC 3339 with up to nanosecond precision
/// - `raw_value` is a decimal-formatted number
///
/// Parsing happens lazily in the builders so that one malformed report
/// never prevents the rest of the log from being read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Observation {
    metric_name: String,
    timestamp: String,
    raw_value: String,
}

impl Observation {
    /// Create a new observation.
    ///
    /// # Arguments
    ///
    /// * `metric_name` - Metric name (e.g., "loss", "accuracy")
    /// * `timestamp` - RFC 3339 timestamp (e.g., "2021-01-01T00:00:00.123456789Z")
    /// * `raw_value` - Decimal value as reported (e.g., "0.5")
    #[must_use]
    pub fn new(
        metric_name: impl Into<String>,
        timestamp: impl Into<String>,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            timestamp: timestamp.into(),
            raw_value: raw_value.into(),
        }
    }

    /// Get the metric name.
    #[must_use]
    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    /// Get the raw timestamp text.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the raw value text.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }
}

/// Observation log of exactly one trial, in arrival order.
///
/// Arrival order is the only ordering guarantee; entries are not
/// necessarily sorted by time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservationLog {
    trial_id: String,
    observations: Vec<Observation>,
}

impl ObservationLog {
    /// Create an empty log for a trial.
    #[must_use]
    pub fn new(trial_id: impl Into<String>) -> Self {
        Self {
            trial_id: trial_id.into(),
            observations: Vec::new(),
        }
    }

    /// Create a log from observations already in arrival order.
    #[must_use]
    pub fn with_observations(trial_id: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            trial_id: trial_id.into(),
            observations,
        }
    }

    /// Get the owning trial ID.
    #[must_use]
    pub fn trial_id(&self) -> &str {
        &self.trial_id
    }

    /// Append an observation (arrival order).
    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Get the observations in arrival order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObservationLog {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
