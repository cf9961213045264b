//! Metric time series for a single trial
//!
//! Turns one trial's observation log into a deduplicated sequence of
//! `(metric, second, best value)` points:
//!
//! - timestamps are truncated to the second (see [`crate::timestamp`])
//! - consecutive reports of a metric within the same second collapse into
//!   one point holding the best value under the objective direction
//! - a metric returning to a new second starts a new point
//! - points keep first-append order across metrics (not grouped)
//!
//! Observations whose timestamp cannot be parsed are skipped and recorded
//! in [`MetricTimeSeries::skipped`]; they never abort the series. Any other
//! error does.
//!
//! ## Example
//!
//! ```rust
//! use trueno_trials::experiment::{ObjectiveDirection, ObjectiveSpec, Observation, ObservationLog};
//! use trueno_trials::timeseries::build_time_series;
//!
//! let objective = ObjectiveSpec::new(ObjectiveDirection::Minimize, "loss");
//! let log = ObservationLog::with_observations("trial-1", vec![
//!     Observation::new("loss", "2021-01-01T00:00:00.1Z", "0.5"),
//!     Observation::new("loss", "2021-01-01T00:00:00.7Z", "0.3"),
//! ]);
//!
//! let series = build_time_series(&log, &objective).unwrap();
//! assert_eq!(series.len(), 1);
//! assert_eq!(series.points()[0].value(), "0.3");
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReportConfig;
use crate::experiment::{ObjectiveDirection, ObjectiveSpec, Observation, ObservationLog};
use crate::select::{BestValueSelector, Winner};
use crate::timestamp::normalize_with;
use crate::{Error, Result};

/// Fixed header row of every time series.
pub const TIME_SERIES_HEADER: [&str; 3] = ["metricName", "time", "value"];

/// Best value of one metric within one normalized second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    metric_name: String,
    normalized_timestamp: String,
    value: String,
}

impl TimeSeriesPoint {
    /// Get the metric name.
    #[must_use]
    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    /// Get the second-resolution timestamp.
    #[must_use]
    pub fn normalized_timestamp(&self) -> &str {
        &self.normalized_timestamp
    }

    /// Get the best value seen for this metric within this second.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.metric_name.clone(),
            self.normalized_timestamp.clone(),
            self.value.clone(),
        ]
    }
}

/// Diagnostic for an observation left out of the series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedObservation {
    /// Position of the observation in the log (arrival order).
    pub position: usize,
    /// Metric the observation reported.
    pub metric_name: String,
    /// Rejected timestamp text.
    pub timestamp: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Deduplicated time series of one trial.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricTimeSeries {
    points: Vec<TimeSeriesPoint>,
    skipped: Vec<SkippedObservation>,
}

impl MetricTimeSeries {
    /// Header row (`metricName,time,value`).
    #[must_use]
    pub const fn header() -> [&'static str; 3] {
        TIME_SERIES_HEADER
    }

    /// Points in first-append order.
    #[must_use]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Observations skipped because their timestamp did not parse.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedObservation] {
        &self.skipped
    }

    /// Number of points (header excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Header followed by one row per point.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.points.len() + 1);
        rows.push(TIME_SERIES_HEADER.iter().map(ToString::to_string).collect());
        rows.extend(self.points.iter().map(TimeSeriesPoint::to_row));
        rows
    }
}

/// Latest second seen for a metric and where its point lives in the output.
#[derive(Debug)]
struct MetricCursor {
    normalized_timestamp: String,
    position: usize,
}

/// Per-build bookkeeping; constructed fresh for every series.
#[derive(Debug)]
pub struct TimeSeriesState<'a> {
    direction: ObjectiveDirection,
    time_format: &'a str,
    cursors: FxHashMap<String, MetricCursor>,
    series: MetricTimeSeries,
}

impl<'a> TimeSeriesState<'a> {
    /// Start an empty series for the given direction, normalizing with
    /// `config`'s time layout.
    #[must_use]
    pub fn new(direction: ObjectiveDirection, config: &'a ReportConfig) -> Self {
        Self {
            direction,
            time_format: config.time_format(),
            cursors: FxHashMap::default(),
            series: MetricTimeSeries::default(),
        }
    }

    /// Fold one observation (the `position`-th in arrival order) into the series.
    ///
    /// An unparsable timestamp is recorded as skipped and is not an error.
    ///
    /// # Errors
    ///
    /// Returns any other normalization error unchanged.
    pub fn observe(&mut self, position: usize, observation: &Observation) -> Result<()> {
        let normalized = match normalize_with(observation.timestamp(), self.time_format) {
            Ok(normalized) => normalized,
            Err(e @ Error::TimestampParse { .. }) => {
                debug!(
                    position,
                    metric = observation.metric_name(),
                    "Skipping observation: {e}"
                );
                self.series.skipped.push(SkippedObservation {
                    position,
                    metric_name: observation.metric_name().to_string(),
                    timestamp: observation.timestamp().to_string(),
                    reason: e.to_string(),
                });
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if let Some(cursor) = self.cursors.get_mut(observation.metric_name()) {
            if cursor.normalized_timestamp == normalized {
                let point = &mut self.series.points[cursor.position];
                if BestValueSelector::compare(self.direction, &point.value, observation.raw_value())
                    == Winner::Challenger
                {
                    point.value = observation.raw_value().to_string();
                }
                return Ok(());
            }
            cursor.normalized_timestamp.clone_from(&normalized);
            cursor.position = self.series.points.len();
        } else {
            self.cursors.insert(
                observation.metric_name().to_string(),
                MetricCursor {
                    normalized_timestamp: normalized.clone(),
                    position: self.series.points.len(),
                },
            );
        }

        self.series.points.push(TimeSeriesPoint {
            metric_name: observation.metric_name().to_string(),
            normalized_timestamp: normalized,
            value: observation.raw_value().to_string(),
        });
        Ok(())
    }

    /// Finish the build and hand out the series.
    #[must_use]
    pub fn finish(self) -> MetricTimeSeries {
        self.series
    }
}

/// Builds [`MetricTimeSeries`] values under a [`ReportConfig`].
#[derive(Debug, Clone, Copy)]
pub struct MetricTimeSeriesBuilder<'a> {
    config: &'a ReportConfig,
}

impl<'a> MetricTimeSeriesBuilder<'a> {
    /// Create a builder using `config`'s time layout.
    #[must_use]
    pub const fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Build the series for one trial's log.
    ///
    /// # Errors
    ///
    /// Fails only if normalization fails for a reason other than an
    /// unparsable timestamp.
    pub fn build(&self, log: &ObservationLog, objective: &ObjectiveSpec) -> Result<MetricTimeSeries> {
        let mut state = TimeSeriesState::new(objective.direction(), self.config);
        for (position, observation) in log.observations().iter().enumerate() {
            state.observe(position, observation)?;
        }
        let series = state.finish();
        debug!(
            trial = log.trial_id(),
            observations = log.len(),
            points = series.len(),
            skipped = series.skipped().len(),
            "Built metric time series"
        );
        Ok(series)
    }
}

/// Build a time series with the default configuration.
///
/// # Errors
///
/// See [`MetricTimeSeriesBuilder::build`].
pub fn build_time_series(log: &ObservationLog, objective: &ObjectiveSpec) -> Result<MetricTimeSeries> {
    MetricTimeSeriesBuilder::new(&ReportConfig::default()).build(log, objective)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimize() -> ObjectiveSpec {
        ObjectiveSpec::new(ObjectiveDirection::Minimize, "loss")
    }

    fn maximize() -> ObjectiveSpec {
        ObjectiveSpec::new(ObjectiveDirection::Maximize, "accuracy")
    }

    fn log(entries: &[(&str, &str, &str)]) -> ObservationLog {
        ObservationLog::with_observations(
            "trial-1",
            entries
                .iter()
                .map(|(m, t, v)| Observation::new(*m, *t, *v))
                .collect(),
        )
    }

    fn series_of(log: &ObservationLog, objective: &ObjectiveSpec) -> MetricTimeSeries {
        build_time_series(log, objective).unwrap()
    }

    fn triples(series: &MetricTimeSeries) -> Vec<(&str, &str, &str)> {
        series
            .points()
            .iter()
            .map(|p| (p.metric_name(), p.normalized_timestamp(), p.value()))
            .collect()
    }

    #[test]
    fn test_empty_log_yields_header_only() {
        let series = series_of(&ObservationLog::new("trial-1"), &minimize());
        assert!(series.is_empty());
        assert_eq!(series.rows(), vec![vec!["metricName", "time", "value"]]);
    }

    #[test]
    fn test_same_second_minimize_keeps_smaller() {
        let series = series_of(
            &log(&[
                ("loss", "2021-01-01T00:00:00.100Z", "0.5"),
                ("loss", "2021-01-01T00:00:00.900Z", "0.3"),
            ]),
            &minimize(),
        );
        assert_eq!(triples(&series), vec![("loss", "2021-01-01T00:00:00", "0.3")]);
    }

    #[test]
    fn test_same_second_maximize_keeps_larger() {
        let series = series_of(
            &log(&[
                ("accuracy", "2021-01-01T00:00:00.1Z", "0.7"),
                ("accuracy", "2021-01-01T00:00:00.2Z", "0.9"),
                ("accuracy", "2021-01-01T00:00:00.3Z", "0.8"),
            ]),
            &maximize(),
        );
        assert_eq!(triples(&series), vec![("accuracy", "2021-01-01T00:00:00", "0.9")]);
    }

    #[test]
    fn test_same_second_tie_keeps_first() {
        let series = series_of(
            &log(&[
                ("loss", "2021-01-01T00:00:00.1Z", "0.50"),
                ("loss", "2021-01-01T00:00:00.2Z", "0.5"),
            ]),
            &minimize(),
        );
        assert_eq!(series.points()[0].value(), "0.50");
    }

    #[test]
    fn test_distinct_seconds_emit_one_point_each() {
        let series = series_of(
            &log(&[
                ("loss", "2021-01-01T00:00:01Z", "0.9"),
                ("loss", "2021-01-01T00:00:02Z", "0.7"),
                ("loss", "2021-01-01T00:00:03Z", "0.8"),
            ]),
            &minimize(),
        );
        assert_eq!(
            triples(&series),
            vec![
                ("loss", "2021-01-01T00:00:01", "0.9"),
                ("loss", "2021-01-01T00:00:02", "0.7"),
                ("loss", "2021-01-01T00:00:03", "0.8"),
            ]
        );
    }

    #[test]
    fn test_interleaved_metrics_update_their_own_point() {
        let series = series_of(
            &log(&[
                ("loss", "2021-01-01T00:00:00.1Z", "0.5"),
                ("accuracy", "2021-01-01T00:00:00.2Z", "0.6"),
                ("loss", "2021-01-01T00:00:00.3Z", "0.2"),
                ("accuracy", "2021-01-01T00:00:00.4Z", "0.1"),
            ]),
            &minimize(),
        );
        assert_eq!(
            triples(&series),
            vec![
                ("loss", "2021-01-01T00:00:00", "0.2"),
                ("accuracy", "2021-01-01T00:00:00", "0.1"),
            ]
        );
    }

    #[test]
    fn test_only_latest_point_of_metric_is_updated() {
        // loss at :00, :01, then :01 again; only the :01 point changes.
        let series = series_of(
            &log(&[
                ("loss", "2021-01-01T00:00:00Z", "0.9"),
                ("loss", "2021-01-01T00:00:01.1Z", "0.8"),
                ("accuracy", "2021-01-01T00:00:01.2Z", "0.5"),
                ("loss", "2021-01-01T00:00:01.3Z", "0.1"),
            ]),
            &minimize(),
        );
        assert_eq!(
            triples(&series),
            vec![
                ("loss", "2021-01-01T00:00:00", "0.9"),
                ("loss", "2021-01-01T00:00:01", "0.1"),
                ("accuracy", "2021-01-01T00:00:01", "0.5"),
            ]
        );
    }

    #[test]
    fn test_returning_to_earlier_second_starts_new_point() {
        // Dedup compares against the metric's latest second only.
        let series = series_of(
            &log(&[
                ("loss", "2021-01-01T00:00:00Z", "0.9"),
                ("loss", "2021-01-01T00:00:01Z", "0.8"),
                ("loss", "2021-01-01T00:00:00.5Z", "0.7"),
            ]),
            &minimize(),
        );
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[2].normalized_timestamp(), "2021-01-01T00:00:00");
    }

    #[test]
    fn test_unparsable_timestamp_is_skipped_and_recorded() {
        let series = series_of(
            &log(&[
                ("loss", "2021-01-01T00:00:00Z", "0.9"),
                ("loss", "not-a-time", "0.0"),
                ("loss", "2021-01-01T00:00:01Z", "0.8"),
            ]),
            &minimize(),
        );
        assert_eq!(
            triples(&series),
            vec![
                ("loss", "2021-01-01T00:00:00", "0.9"),
                ("loss", "2021-01-01T00:00:01", "0.8"),
            ]
        );
        assert_eq!(series.skipped().len(), 1);
        assert_eq!(series.skipped()[0].position, 1);
        assert_eq!(series.skipped()[0].timestamp, "not-a-time");
    }

    #[test]
    fn test_unparsable_value_replaced_within_second() {
        let series = series_of(
            &log(&[
                ("loss", "2021-01-01T00:00:00.1Z", "oops"),
                ("loss", "2021-01-01T00:00:00.2Z", "0.4"),
                ("loss", "2021-01-01T00:00:00.3Z", "bad"),
            ]),
            &minimize(),
        );
        assert_eq!(triples(&series), vec![("loss", "2021-01-01T00:00:00", "0.4")]);
    }

    #[test]
    fn test_custom_time_format() {
        let config = ReportConfig::builder().time_format("%H:%M:%S").build().unwrap();
        let series = MetricTimeSeriesBuilder::new(&config)
            .build(&log(&[("loss", "2021-01-01T12:00:00.1Z", "0.4")]), &minimize())
            .unwrap();
        assert_eq!(series.points()[0].normalized_timestamp(), "12:00:00");
    }

    #[test]
    fn test_deserialized_config_keeps_second_resolution() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"time_format": "%H:%M:%S"}"#).unwrap();
        let series = MetricTimeSeriesBuilder::new(&config)
            .build(
                &log(&[
                    ("loss", "2021-01-01T00:00:00.1Z", "0.5"),
                    ("loss", "2021-01-01T00:00:00.2Z", "0.3"),
                ]),
                &minimize(),
            )
            .unwrap();
        assert_eq!(triples(&series), vec![("loss", "00:00:00", "0.3")]);
        assert!(series.skipped().is_empty());
    }

    #[test]
    fn test_observe_reports_skip_without_error() {
        let config = ReportConfig::default();
        let mut state = TimeSeriesState::new(ObjectiveDirection::Minimize, &config);
        assert!(state
            .observe(0, &Observation::new("loss", "2021-01-01 00:00:00Z", "0.1"))
            .is_ok());
        let series = state.finish();
        assert!(series.is_empty());
        assert_eq!(series.skipped().len(), 1);
    }
}
