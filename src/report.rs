//! Report service: fetch from collaborators, then build
//!
//! Two reports, each all-or-nothing:
//!
//! - [`ReportService::experiment_table`]: objective + parameter schema +
//!   trial list of an experiment, pivoted into one row per trial
//! - [`ReportService::trial_metrics`]: one trial's observation log as a
//!   deduplicated metric time series
//!
//! # Example
//!
//! ```rust
//! use trueno_trials::experiment::{ObjectiveDirection, ObjectiveSpec, Observation, Trial};
//! use trueno_trials::report::ReportService;
//! use trueno_trials::source::MemoryExperimentSource;
//! use trueno_trials::ReportConfig;
//!
//! # async fn example() -> trueno_trials::Result<()> {
//! let objective = ObjectiveSpec::new(ObjectiveDirection::Minimize, "loss");
//! let source = MemoryExperimentSource::new();
//! source.add_experiment("exp-1", objective.clone(), ["lr"]);
//! source.add_trial(
//!     "exp-1",
//!     Trial::builder("trial-1", objective)
//!         .condition("Succeeded", true)
//!         .parameter("lr", "0.01")
//!         .build(),
//! )?;
//! source.add_observation("trial-1", Observation::new("loss", "2021-01-01T00:00:00Z", "0.3"));
//!
//! let service = ReportService::new(&source, &source, ReportConfig::default())?;
//! let table = service.experiment_table("exp-1").await?;
//! assert_eq!(table.cell("trial-1", "loss"), Some("0.3"));
//! # Ok(())
//! # }
//! ```

use tracing::info;

use crate::config::ReportConfig;
use crate::matrix::{PivotTable, TrialMatrixBuilder};
use crate::source::{ExperimentSource, ObservationLogSource};
use crate::timeseries::{MetricTimeSeries, MetricTimeSeriesBuilder};
use crate::Result;

/// Produces experiment tables and trial time series from collaborators.
///
/// Holds no per-request state: every report builds its own column index
/// and bookkeeping, so one service can serve concurrent requests.
#[derive(Debug)]
pub struct ReportService<'s, E, L> {
    experiments: &'s E,
    logs: &'s L,
    config: ReportConfig,
}

impl<'s, E, L> ReportService<'s, E, L>
where
    E: ExperimentSource,
    L: ObservationLogSource,
{
    /// Create a service over the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] if `config` does not validate.
    pub fn new(experiments: &'s E, logs: &'s L, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            experiments,
            logs,
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Pivot every trial of an experiment into one table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FetchFailure`] if any collaborator fetch fails
    /// and [`crate::Error::SchemaViolation`] if trials or logs disagree with
    /// the experiment's declared metrics and parameters.
    pub async fn experiment_table(&self, experiment_id: &str) -> Result<PivotTable> {
        info!(experiment = experiment_id, "Building experiment table");

        let objective = self
            .experiments
            .fetch_experiment_objective(experiment_id)
            .await?;
        let parameter_names = self.experiments.fetch_parameter_names(experiment_id).await?;
        let trials = self.experiments.fetch_trial_list(experiment_id).await?;

        let table = TrialMatrixBuilder::new(&self.config)
            .build(&trials, &objective, &parameter_names, self.logs)
            .await?;

        info!(
            experiment = experiment_id,
            rows = table.len(),
            columns = table.header().len(),
            "Experiment table ready"
        );
        Ok(table)
    }

    /// Build the deduplicated metric time series of one trial.
    ///
    /// The trial's own objective decides which same-second value wins.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FetchFailure`] if the trial or its log cannot
    /// be fetched.
    pub async fn trial_metrics(&self, trial_id: &str) -> Result<MetricTimeSeries> {
        info!(trial = trial_id, "Building trial metrics");

        let trial = self.experiments.fetch_trial(trial_id).await?;
        let log = self.logs.fetch_observation_log(trial_id).await?;
        let series = MetricTimeSeriesBuilder::new(&self.config).build(&log, trial.objective())?;

        info!(
            trial = trial_id,
            points = series.len(),
            skipped = series.skipped().len(),
            "Trial metrics ready"
        );
        Ok(series)
    }
}
