//! # Trueno-Trials: Observation-Log Aggregation for Hyperparameter Experiments
//!
//! **Version**: 0.1.0
//!
//! Turns the raw metric reports of optimization trials into the two views an
//! experiment dashboard needs:
//!
//! - **Trial matrix**: one row per trial with its current state, the best
//!   value of every declared metric, and every parameter assignment
//!   ([`matrix`])
//! - **Metric time series**: one trial's log deduplicated to the best value
//!   per metric per second ([`timeseries`])
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke**: one [`select::BestValueSelector`] decides every
//!   minimize/maximize comparison, so tie-breaking cannot drift
//! - **Jidoka**: schema violations and fetch failures stop the build; no
//!   partial table is ever returned
//! - **Muda elimination**: per-metric cursors update the latest point in
//!   O(1) instead of rescanning output
//!
//! ## Example Usage
//!
//! ```rust
//! use trueno_trials::experiment::{ObjectiveDirection, ObjectiveSpec, Observation, ObservationLog};
//! use trueno_trials::timeseries::build_time_series;
//!
//! let objective = ObjectiveSpec::new(ObjectiveDirection::Minimize, "loss");
//! let log = ObservationLog::with_observations("trial-1", vec![
//!     Observation::new("loss", "2021-01-01T00:00:00.25Z", "0.5"),
//!     Observation::new("loss", "2021-01-01T00:00:00.75Z", "0.3"),
//!     Observation::new("loss", "2021-01-01T00:00:01.00Z", "0.4"),
//! ]);
//!
//! let series = build_time_series(&log, &objective).unwrap();
//! let values: Vec<&str> = series.points().iter().map(|p| p.value()).collect();
//! assert_eq!(values, vec!["0.3", "0.4"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod columns;
pub mod config;
pub mod error;
pub mod experiment;
pub mod logging;
pub mod matrix;
pub mod render;
pub mod report;
pub mod select;
pub mod source;
pub mod timeseries;
pub mod timestamp;

pub use config::ReportConfig;
pub use error::{Error, Result};
pub use matrix::{PivotRow, PivotTable, TrialMatrixBuilder};
pub use report::ReportService;
pub use select::BestValueSelector;
pub use timeseries::{MetricTimeSeries, MetricTimeSeriesBuilder, TimeSeriesPoint};
