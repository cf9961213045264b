//! Collaborator interfaces for experiment metadata and observation logs
//!
//! The builders never talk to a metrics store or cluster API directly.
//! They consume these traits, and any suspension (network round-trips,
//! retries) happens behind them. Callers bound fetches with their own
//! timeout.
//!
//! # Example
//!
//! ```rust,no_run
//! use trueno_trials::experiment::{ObjectiveDirection, ObjectiveSpec, Observation};
//! use trueno_trials::source::{MemoryExperimentSource, ObservationLogSource};
//!
//! # async fn example() -> trueno_trials::Result<()> {
//! let source = MemoryExperimentSource::new();
//! source.add_observation("trial-1", Observation::new("loss", "2021-01-01T00:00:00Z", "0.5"));
//!
//! let log = source.fetch_observation_log("trial-1").await?;
//! assert_eq!(log.len(), 1);
//! # Ok(())
//! # }
//! ```

mod memory;

pub use memory::MemoryExperimentSource;

use crate::experiment::{ObjectiveSpec, ObservationLog, Trial};
use crate::Result;
use std::future::Future;

/// Source of experiment-level metadata and trial objects.
pub trait ExperimentSource: Send + Sync {
    /// Get the objective an experiment optimizes.
    fn fetch_experiment_objective(
        &self,
        experiment_id: &str,
    ) -> impl Future<Output = Result<ObjectiveSpec>> + Send;

    /// Get the experiment's declared parameter names, in declared order.
    fn fetch_parameter_names(
        &self,
        experiment_id: &str,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Get every trial of an experiment, each with its parameter
    /// assignments and lifecycle conditions.
    fn fetch_trial_list(&self, experiment_id: &str)
        -> impl Future<Output = Result<Vec<Trial>>> + Send;

    /// Get a single trial.
    fn fetch_trial(&self, trial_id: &str) -> impl Future<Output = Result<Trial>> + Send;
}

/// Source of per-trial observation logs.
pub trait ObservationLogSource: Send + Sync {
    /// Get a trial's full observation log in arrival order.
    fn fetch_observation_log(
        &self,
        trial_id: &str,
    ) -> impl Future<Output = Result<ObservationLog>> + Send;
}
