//! In-memory experiment source using `DashMap`.
//!
//! Holds experiments, trials and observation logs for tests, benchmarks
//! and demos. Data is lost on process restart.

use super::{ExperimentSource, ObservationLogSource};
use crate::experiment::{ObjectiveSpec, Observation, ObservationLog, Trial};
use crate::{Error, Result};
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct ExperimentEntry {
    objective: ObjectiveSpec,
    parameter_names: Vec<String>,
    trial_ids: Vec<String>,
}

/// In-memory implementation of both collaborator traits.
///
/// Thread-safe; lookups of unknown experiments or trials fail with
/// [`Error::FetchFailure`], like an unreachable metrics store would.
/// A registered trial with no reported observations has an empty log.
///
/// # Example
///
/// ```rust
/// use trueno_trials::experiment::{ObjectiveDirection, ObjectiveSpec, Trial};
/// use trueno_trials::source::{ExperimentSource, MemoryExperimentSource};
///
/// # async fn example() -> trueno_trials::Result<()> {
/// let objective = ObjectiveSpec::new(ObjectiveDirection::Minimize, "loss");
/// let source = MemoryExperimentSource::new();
/// source.add_experiment("exp-1", objective.clone(), ["lr"]);
/// source.add_trial("exp-1", Trial::new("trial-1", objective))?;
///
/// assert_eq!(source.fetch_trial_list("exp-1").await?.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryExperimentSource {
    experiments: DashMap<String, ExperimentEntry>,
    trials: DashMap<String, Trial>,
    logs: DashMap<String, ObservationLog>,
}

impl MemoryExperimentSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an experiment with its objective and declared parameters.
    ///
    /// Re-registering replaces the metadata and forgets its trial list.
    pub fn add_experiment<I, S>(&self, experiment_id: &str, objective: ObjectiveSpec, parameters: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.experiments.insert(
            experiment_id.to_string(),
            ExperimentEntry {
                objective,
                parameter_names: parameters.into_iter().map(Into::into).collect(),
                trial_ids: Vec::new(),
            },
        );
    }

    /// Register a trial under an experiment (trial list keeps insertion order).
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailure`] if the experiment is unknown.
    pub fn add_trial(&self, experiment_id: &str, trial: Trial) -> Result<()> {
        let mut entry = self
            .experiments
            .get_mut(experiment_id)
            .ok_or_else(|| Error::fetch("experiment", experiment_id, "not found"))?;
        if !entry.trial_ids.iter().any(|id| id == trial.id()) {
            entry.trial_ids.push(trial.id().to_string());
        }
        self.trials.insert(trial.id().to_string(), trial);
        Ok(())
    }

    /// Append one observation to a trial's log.
    pub fn add_observation(&self, trial_id: &str, observation: Observation) {
        self.logs
            .entry(trial_id.to_string())
            .or_insert_with(|| ObservationLog::new(trial_id))
            .push(observation);
    }

    /// Replace a trial's whole log.
    pub fn set_observation_log(&self, log: ObservationLog) {
        self.logs.insert(log.trial_id().to_string(), log);
    }

    /// Number of registered trials across all experiments.
    #[must_use]
    pub fn trial_count(&self) -> usize {
        self.trials.len()
    }

    /// Check if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty() && self.trials.is_empty() && self.logs.is_empty()
    }

    fn experiment(&self, experiment_id: &str) -> Result<ExperimentEntry> {
        self.experiments
            .get(experiment_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::fetch("experiment", experiment_id, "not found"))
    }
}

impl ExperimentSource for MemoryExperimentSource {
    async fn fetch_experiment_objective(&self, experiment_id: &str) -> Result<ObjectiveSpec> {
        self.experiment(experiment_id).map(|entry| entry.objective)
    }

    async fn fetch_parameter_names(&self, experiment_id: &str) -> Result<Vec<String>> {
        self.experiment(experiment_id)
            .map(|entry| entry.parameter_names)
    }

    async fn fetch_trial_list(&self, experiment_id: &str) -> Result<Vec<Trial>> {
        let entry = self.experiment(experiment_id)?;
        entry
            .trial_ids
            .iter()
            .map(|trial_id| {
                self.trials
                    .get(trial_id)
                    .map(|trial| trial.value().clone())
                    .ok_or_else(|| Error::fetch("trial", trial_id.as_str(), "not found"))
            })
            .collect()
    }

    async fn fetch_trial(&self, trial_id: &str) -> Result<Trial> {
        self.trials
            .get(trial_id)
            .map(|trial| trial.value().clone())
            .ok_or_else(|| Error::fetch("trial", trial_id, "not found"))
    }
}

impl ObservationLogSource for MemoryExperimentSource {
    async fn fetch_observation_log(&self, trial_id: &str) -> Result<ObservationLog> {
        if let Some(log) = self.logs.get(trial_id) {
            return Ok(log.value().clone());
        }
        if self.trials.contains_key(trial_id) {
            return Ok(ObservationLog::new(trial_id));
        }
        Err(Error::fetch("observation log", trial_id, "unknown trial"))
    }
}
