//! Objective Spec - what an experiment optimizes

use serde::{Deserialize, Serialize};

/// Whether lower or higher metric values are considered better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveDirection {
    /// Smaller values win.
    Minimize,
    /// Larger values win.
    Maximize,
}

/// Objective of an experiment: direction plus the metrics it reports.
///
/// The primary metric is the one being optimized; additional metrics are
/// collected alongside it and displayed in declared order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectiveSpec {
    direction: ObjectiveDirection,
    primary_metric_name: String,
    additional_metric_names: Vec<String>,
}

impl ObjectiveSpec {
    /// Create an objective with no additional metrics.
    ///
    /// # Arguments
    ///
    /// * `direction` - Minimize or Maximize
    /// * `primary_metric_name` - Metric being optimized (e.g., "loss")
    #[must_use]
    pub fn new(direction: ObjectiveDirection, primary_metric_name: impl Into<String>) -> Self {
        Self {
            direction,
            primary_metric_name: primary_metric_name.into(),
            additional_metric_names: Vec::new(),
        }
    }

    /// Create a builder for an objective with additional metrics.
    #[must_use]
    pub fn builder(
        direction: ObjectiveDirection,
        primary_metric_name: impl Into<String>,
    ) -> ObjectiveSpecBuilder {
        ObjectiveSpecBuilder::new(direction, primary_metric_name)
    }

    /// Get the optimization direction.
    #[must_use]
    pub const fn direction(&self) -> ObjectiveDirection {
        self.direction
    }

    /// Get the primary metric name.
    #[must_use]
    pub fn primary_metric_name(&self) -> &str {
        &self.primary_metric_name
    }

    /// Get the additional metric names in declared order.
    #[must_use]
    pub fn additional_metric_names(&self) -> &[String] {
        &self.additional_metric_names
    }

    /// All metric names: primary first, then additional in declared order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_metric_name.as_str())
            .chain(self.additional_metric_names.iter().map(String::as_str))
    }

    /// Number of declared metrics (primary + additional).
    #[must_use]
    pub fn metric_count(&self) -> usize {
        1 + self.additional_metric_names.len()
    }
}

/// Builder for `ObjectiveSpec`.
#[derive(Debug)]
pub struct ObjectiveSpecBuilder {
    direction: ObjectiveDirection,
    primary_metric_name: String,
    additional_metric_names: Vec<String>,
}

impl ObjectiveSpecBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(direction: ObjectiveDirection, primary_metric_name: impl Into<String>) -> Self {
        Self {
            direction,
            primary_metric_name: primary_metric_name.into(),
            additional_metric_names: Vec::new(),
        }
    }

    /// Append an additional metric name.
    #[must_use]
    pub fn additional_metric(mut self, name: impl Into<String>) -> Self {
        self.additional_metric_names.push(name.into());
        self
    }

    /// Append several additional metric names, keeping their order.
    #[must_use]
    pub fn additional_metrics<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_metric_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Build the `ObjectiveSpec`.
    #[must_use]
    pub fn build(self) -> ObjectiveSpec {
        ObjectiveSpec {
            direction: self.direction,
            primary_metric_name: self.primary_metric_name,
            additional_metric_names: self.additional_metric_names,
        }
    }
}
