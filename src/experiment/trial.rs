//! Trial - one evaluation run within an experiment

use serde::{Deserialize, Serialize};

use super::ObjectiveSpec;

/// One lifecycle condition reported for a trial.
///
/// Conditions arrive in order; the last one is the trial's current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrialCondition {
    condition_type: String,
    is_success: bool,
}

impl TrialCondition {
    /// Create a condition.
    ///
    /// # Arguments
    ///
    /// * `condition_type` - Condition label (e.g., "Created", "Running", "Succeeded")
    /// * `is_success` - Whether this condition marks the trial as succeeded
    #[must_use]
    pub fn new(condition_type: impl Into<String>, is_success: bool) -> Self {
        Self {
            condition_type: condition_type.into(),
            is_success,
        }
    }

    /// Get the condition label.
    #[must_use]
    pub fn condition_type(&self) -> &str {
        &self.condition_type
    }

    /// Whether this condition carries the success marker.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.is_success
    }
}

/// Value assigned to one declared experiment parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterAssignment {
    name: String,
    value: String,
}

impl ParameterAssignment {
    /// Create a parameter assignment.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the assigned value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Trial represents a single evaluation of an experiment.
///
/// A trial carries its own parameter assignments, the objective it was
/// evaluated against, and the lifecycle conditions reported so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trial {
    id: String,
    conditions: Vec<TrialCondition>,
    objective: ObjectiveSpec,
    parameter_assignments: Vec<ParameterAssignment>,
}

impl Trial {
    /// Create a trial with no conditions and no parameter assignments.
    #[must_use]
    pub fn new(id: impl Into<String>, objective: ObjectiveSpec) -> Self {
        Self {
            id: id.into(),
            conditions: Vec::new(),
            objective,
            parameter_assignments: Vec::new(),
        }
    }

    /// Create a builder for constructing a trial with conditions and parameters.
    #[must_use]
    pub fn builder(id: impl Into<String>, objective: ObjectiveSpec) -> TrialBuilder {
        TrialBuilder::new(id, objective)
    }

    /// Get the trial ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the lifecycle conditions in arrival order.
    #[must_use]
    pub fn conditions(&self) -> &[TrialCondition] {
        &self.conditions
    }

    /// Get the objective this trial was evaluated against.
    #[must_use]
    pub const fn objective(&self) -> &ObjectiveSpec {
        &self.objective
    }

    /// Get the parameter assignments.
    #[must_use]
    pub fn parameter_assignments(&self) -> &[ParameterAssignment] {
        &self.parameter_assignments
    }

    /// A trial succeeded iff any of its conditions carries the success marker.
    #[must_use]
    pub fn is_succeeded(&self) -> bool {
        self.conditions.iter().any(TrialCondition::is_success)
    }

    /// Label of the latest condition, or `""` if none was reported.
    #[must_use]
    pub fn current_state(&self) -> &str {
        self.conditions
            .last()
            .map_or("", TrialCondition::condition_type)
    }

    /// Record a new lifecycle condition.
    pub fn push_condition(&mut self, condition: TrialCondition) {
        self.conditions.push(condition);
    }
}

/// Builder for `Trial`.
#[derive(Debug)]
pub struct TrialBuilder {
    id: String,
    conditions: Vec<TrialCondition>,
    objective: ObjectiveSpec,
    parameter_assignments: Vec<ParameterAssignment>,
}

impl TrialBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, objective: ObjectiveSpec) -> Self {
        Self {
            id: id.into(),
            conditions: Vec::new(),
            objective,
            parameter_assignments: Vec::new(),
        }
    }

    /// Append a lifecycle condition.
    #[must_use]
    pub fn condition(mut self, condition_type: impl Into<String>, is_success: bool) -> Self {
        self.conditions
            .push(TrialCondition::new(condition_type, is_success));
        self
    }

    /// Append a parameter assignment.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameter_assignments
            .push(ParameterAssignment::new(name, value));
        self
    }

    /// Build the `Trial`.
    #[must_use]
    pub fn build(self) -> Trial {
        Trial {
            id: self.id,
            conditions: self.conditions,
            objective: self.objective,
            parameter_assignments: self.parameter_assignments,
        }
    }
}
