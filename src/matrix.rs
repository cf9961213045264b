//! Trial matrix (pivot table) for an experiment
//!
//! One row per trial:
//!
//! ```text
//! trialName | Status    | loss | accuracy | lr   | batch_size
//! trial-1   | Succeeded | 0.12 | 0.97     | 0.01 | 32
//! trial-2   | Failed    |      |          | 0.1  | 64
//! ```
//!
//! Metric cells hold the best value the trial ever reported for that metric
//! (under the objective direction); they stay empty for trials that never
//! succeeded, whose logs are not fetched at all. Parameter cells are always
//! filled.
//!
//! The build is all-or-nothing: a log that cannot be fetched, or a name
//! outside the declared schema, fails the whole table.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::columns::{ColumnIndex, ColumnKind};
use crate::config::ReportConfig;
use crate::experiment::{ObjectiveDirection, ObjectiveSpec, ObservationLog, Trial};
use crate::select::{BestValueSelector, Winner};
use crate::source::ObservationLogSource;
use crate::{Error, Result};

/// One trial's row: id, current state, then one cell per column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PivotRow {
    trial_id: String,
    state: String,
    cells: Vec<String>,
}

impl PivotRow {
    /// Get the trial ID.
    #[must_use]
    pub fn trial_id(&self) -> &str {
        &self.trial_id
    }

    /// Get the label of the trial's latest lifecycle condition.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Get the cells, indexed by [`ColumnIndex`] offset.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Flatten into `[trial_id, state, cells...]`.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(self.cells.len() + 2);
        row.push(self.trial_id.clone());
        row.push(self.state.clone());
        row.extend(self.cells.iter().cloned());
        row
    }
}

/// Pivoted trial table with its column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotTable {
    header: Vec<String>,
    columns: ColumnIndex,
    rows: Vec<PivotRow>,
}

impl PivotTable {
    /// Header row: trial-id label, state label, then column names.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Column layout shared by all rows.
    #[must_use]
    pub const fn columns(&self) -> &ColumnIndex {
        &self.columns
    }

    /// Trial rows in input order.
    #[must_use]
    pub fn pivot_rows(&self) -> &[PivotRow] {
        &self.rows
    }

    /// Find a trial's row.
    #[must_use]
    pub fn row(&self, trial_id: &str) -> Option<&PivotRow> {
        self.rows.iter().find(|row| row.trial_id == trial_id)
    }

    /// Cell of `trial_id` under column `name`.
    #[must_use]
    pub fn cell(&self, trial_id: &str, name: &str) -> Option<&str> {
        let offset = self.columns.get(name)?;
        self.row(trial_id).map(|row| row.cells[offset].as_str())
    }

    /// Number of trial rows (header excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no trial rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header followed by one flattened row per trial.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(self.header.clone());
        rows.extend(self.rows.iter().map(PivotRow::to_row));
        rows
    }
}

/// Build one trial's row.
///
/// `log` is consulted only if the trial succeeded; pass `None` for trials
/// whose log was not fetched.
///
/// # Errors
///
/// Returns [`Error::SchemaViolation`] if the log reports a metric, or the
/// trial assigns a parameter, that the column layout does not declare.
pub fn pivot_row(
    columns: &ColumnIndex,
    direction: ObjectiveDirection,
    trial: &Trial,
    log: Option<&ObservationLog>,
) -> Result<PivotRow> {
    let mut cells = vec![String::new(); columns.len()];

    if trial.is_succeeded() {
        for observation in log.into_iter().flatten() {
            let offset = column_of(columns, ColumnKind::Metric, observation.metric_name(), trial)?;
            let cell = &mut cells[offset];
            if cell.is_empty()
                || BestValueSelector::compare(direction, cell.as_str(), observation.raw_value())
                    == Winner::Challenger
            {
                observation.raw_value().clone_into(cell);
            }
        }
    }

    for assignment in trial.parameter_assignments() {
        let offset = column_of(columns, ColumnKind::Parameter, assignment.name(), trial)?;
        assignment.value().clone_into(&mut cells[offset]);
    }

    Ok(PivotRow {
        trial_id: trial.id().to_string(),
        state: trial.current_state().to_string(),
        cells,
    })
}

fn column_of(columns: &ColumnIndex, kind: ColumnKind, name: &str, trial: &Trial) -> Result<usize> {
    let offset = columns
        .offset(name)
        .map_err(|e| Error::SchemaViolation(format!("trial '{}': {e}", trial.id())))?;
    if columns.kind(offset) != kind {
        return Err(Error::SchemaViolation(format!(
            "trial '{}': '{name}' is not a declared {}",
            trial.id(),
            match kind {
                ColumnKind::Metric => "metric",
                ColumnKind::Parameter => "parameter",
            }
        )));
    }
    Ok(offset)
}

/// Builds [`PivotTable`] values under a [`ReportConfig`].
#[derive(Debug, Clone, Copy)]
pub struct TrialMatrixBuilder<'a> {
    config: &'a ReportConfig,
}

impl<'a> TrialMatrixBuilder<'a> {
    /// Create a builder using `config`'s header labels.
    #[must_use]
    pub const fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Build the pivot table for `trials`.
    ///
    /// Logs are fetched from `logs` only for succeeded trials, one at a
    /// time, in trial order.
    ///
    /// # Errors
    ///
    /// - [`Error::FetchFailure`] if any succeeded trial's log cannot be fetched
    /// - [`Error::SchemaViolation`] if names in the logs or assignments are
    ///   not declared, or the declared names collide
    pub async fn build<S>(
        &self,
        trials: &[Trial],
        objective: &ObjectiveSpec,
        parameter_names: &[String],
        logs: &S,
    ) -> Result<PivotTable>
    where
        S: ObservationLogSource,
    {
        let columns = ColumnIndex::assign(objective, parameter_names)?;
        info!(
            trials = trials.len(),
            metrics = columns.metric_count(),
            parameters = columns.parameter_count(),
            "Building trial matrix"
        );

        let mut rows = Vec::with_capacity(trials.len());
        for trial in trials {
            let log = if trial.is_succeeded() {
                let log = logs
                    .fetch_observation_log(trial.id())
                    .await
                    .map_err(|e| {
                        warn!(trial = trial.id(), "Observation log fetch failed: {e}");
                        e
                    })?;
                debug!(trial = trial.id(), observations = log.len(), "Fetched observation log");
                Some(log)
            } else {
                None
            };
            rows.push(pivot_row(&columns, objective.direction(), trial, log.as_ref())?);
        }

        let mut header = Vec::with_capacity(columns.len() + 2);
        header.push(self.config.trial_name_header().to_string());
        header.push(self.config.status_header().to_string());
        header.extend(columns.names().iter().cloned());

        Ok(PivotTable {
            header,
            columns,
            rows,
        })
    }
}
