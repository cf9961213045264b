//! Property-based tests for trueno-trials
//!
//! Following ruchy/trueno/aprender pattern:
//! - Test mathematical invariants
//! - Test data integrity properties
//! - Run with ProptestConfig::with_cases(100)
//! - Must complete in <30 seconds for pre-commit hook

use proptest::prelude::*;
use std::collections::HashSet;
use trueno_trials::columns::ColumnIndex;
use trueno_trials::experiment::{
    ObjectiveDirection, ObjectiveSpec, Observation, ObservationLog, Trial,
};
use trueno_trials::matrix::pivot_row;
use trueno_trials::select::BestValueSelector;
use trueno_trials::timeseries::build_time_series;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

fn arb_direction() -> impl Strategy<Value = ObjectiveDirection> {
    prop_oneof![Just(ObjectiveDirection::Minimize), Just(ObjectiveDirection::Maximize)]
}

/// Decimal-formatted value, as a metrics collector would report it
fn arb_value() -> impl Strategy<Value = String> {
    (-1000.0f64..1000.0).prop_map(|v| format!("{v:.3}"))
}

/// Observation over a small metric set and a narrow time window, so that
/// same-second collisions are frequent
fn arb_observation() -> impl Strategy<Value = Observation> {
    (
        prop::sample::select(vec!["loss", "accuracy", "f1"]),
        0u32..4,
        0u32..1_000_000_000,
        arb_value(),
    )
        .prop_map(|(metric, second, nanos, value)| {
            Observation::new(
                metric,
                format!("2021-01-01T00:00:{second:02}.{nanos:09}Z"),
                value,
            )
        })
}

fn arb_log(max_len: usize) -> impl Strategy<Value = ObservationLog> {
    proptest::collection::vec(arb_observation(), 0..max_len)
        .prop_map(|obs| ObservationLog::with_observations("trial-p", obs))
}

fn objective(direction: ObjectiveDirection) -> ObjectiveSpec {
    ObjectiveSpec::builder(direction, "loss")
        .additional_metrics(["accuracy", "f1"])
        .build()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Best-Value Selector Properties
    // ========================================================================

    /// Property: Minimize picks the smaller value, ties keep the first
    #[test]
    fn prop_select_minimize_picks_smaller(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let (sa, sb) = (a.to_string(), b.to_string());
        let winner = BestValueSelector::select(ObjectiveDirection::Minimize, &sa, &sb);
        let expected = if b < a { &sb } else { &sa };
        prop_assert_eq!(winner, expected.as_str());
    }

    /// Property: Maximize picks the larger value, ties keep the first
    #[test]
    fn prop_select_maximize_picks_larger(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let (sa, sb) = (a.to_string(), b.to_string());
        let winner = BestValueSelector::select(ObjectiveDirection::Maximize, &sa, &sb);
        let expected = if b > a { &sb } else { &sa };
        prop_assert_eq!(winner, expected.as_str());
    }

    /// Property: A value always ties with itself and stays
    #[test]
    fn prop_select_tie_keeps_first(value in arb_value(), direction in arb_direction()) {
        let copy = value.clone();
        let winner = BestValueSelector::select(direction, &value, &copy);
        prop_assert!(std::ptr::eq(winner, value.as_str()));
    }

    // ========================================================================
    // Column Index Properties
    // ========================================================================

    /// Property: Offsets are a bijection onto 0..len
    #[test]
    fn prop_column_index_bijection(
        names in proptest::collection::hash_set("[a-z]{1,8}", 1..12),
        split in 0usize..12,
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let split = split.min(names.len() - 1);
        let objective = ObjectiveSpec::builder(ObjectiveDirection::Minimize, names[0].clone())
            .additional_metrics(names[1..=split].iter().cloned())
            .build();
        let parameters = &names[split + 1..];

        let index = ColumnIndex::assign(&objective, parameters).unwrap();

        prop_assert_eq!(index.len(), names.len());
        prop_assert_eq!(index.metric_count(), split + 1);
        let offsets: HashSet<usize> = names.iter().map(|n| index.offset(n).unwrap()).collect();
        prop_assert_eq!(offsets, (0..names.len()).collect::<HashSet<_>>());
        for (offset, name) in index.names().iter().enumerate() {
            prop_assert_eq!(index.get(name), Some(offset));
        }
    }

    // ========================================================================
    // Time Series Properties
    // ========================================================================

    /// Property: Consecutive points of a metric never share a second
    #[test]
    fn prop_series_no_consecutive_duplicates(log in arb_log(60), direction in arb_direction()) {
        let series = build_time_series(&log, &objective(direction)).unwrap();
        let mut last_second: std::collections::HashMap<&str, &str> = Default::default();
        for point in series.points() {
            let previous = last_second.insert(point.metric_name(), point.normalized_timestamp());
            prop_assert_ne!(previous, Some(point.normalized_timestamp()));
        }
    }

    /// Property: Every point holds the best value of its run of same-second reports
    #[test]
    fn prop_series_point_is_best_of_run(log in arb_log(60), direction in arb_direction()) {
        let series = build_time_series(&log, &objective(direction)).unwrap();
        let points = series.points();

        // Replay: group consecutive same-second reports per metric
        let mut runs: Vec<(String, String, Vec<f64>)> = Vec::new();
        let mut open: std::collections::HashMap<String, usize> = Default::default();
        for obs in &log {
            let second = obs.timestamp()[..19].to_string();
            let value: f64 = obs.raw_value().parse().unwrap();
            let current = open.get(obs.metric_name()).copied();
            match current {
                Some(i) if runs[i].1 == second => runs[i].2.push(value),
                _ => {
                    open.insert(obs.metric_name().to_string(), runs.len());
                    runs.push((obs.metric_name().to_string(), second, vec![value]));
                }
            }
        }

        prop_assert_eq!(points.len(), runs.len());
        for (point, (metric, second, values)) in points.iter().zip(&runs) {
            prop_assert_eq!(point.metric_name(), metric.as_str());
            prop_assert_eq!(point.normalized_timestamp(), second.as_str());
            let best = match direction {
                ObjectiveDirection::Minimize => values.iter().copied().fold(f64::INFINITY, f64::min),
                ObjectiveDirection::Maximize => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            };
            let got: f64 = point.value().parse().unwrap();
            prop_assert!((got - best).abs() < 1e-9, "{} != {}", got, best);
        }
    }

    /// Property: Unparsable timestamps drop exactly those observations
    #[test]
    fn prop_series_skips_only_bad_timestamps(log in arb_log(40), bad_at in 0usize..40) {
        let mut observations = log.observations().to_vec();
        let position = bad_at.min(observations.len());
        observations.insert(position, Observation::new("loss", "not a time", "0"));
        let noisy = ObservationLog::with_observations("trial-p", observations);

        let objective = objective(ObjectiveDirection::Minimize);
        let clean = build_time_series(&log, &objective).unwrap();
        let dirty = build_time_series(&noisy, &objective).unwrap();

        prop_assert_eq!(clean.points(), dirty.points());
        prop_assert_eq!(dirty.skipped().len(), 1);
        prop_assert_eq!(dirty.skipped()[0].position, position);
    }

    /// Property: Rebuilding from the same log yields identical output
    #[test]
    fn prop_series_deterministic(log in arb_log(60), direction in arb_direction()) {
        let objective = objective(direction);
        let first = build_time_series(&log, &objective).unwrap();
        let second = build_time_series(&log, &objective).unwrap();
        prop_assert_eq!(first, second);
    }

    // ========================================================================
    // Pivot Row Properties
    // ========================================================================

    /// Property: A succeeded trial's metric cell is the best value of its log
    #[test]
    fn prop_pivot_cell_is_global_best(log in arb_log(60), direction in arb_direction()) {
        let objective = objective(direction);
        let columns = ColumnIndex::assign(&objective, ["lr"]).unwrap();
        let trial = Trial::builder("trial-p", objective.clone())
            .condition("Succeeded", true)
            .parameter("lr", "0.1")
            .build();

        let row = pivot_row(&columns, direction, &trial, Some(&log)).unwrap();

        for metric in ["loss", "accuracy", "f1"] {
            let values: Vec<f64> = log
                .observations()
                .iter()
                .filter(|o| o.metric_name() == metric)
                .map(|o| o.raw_value().parse().unwrap())
                .collect();
            let cell = &row.cells()[columns.offset(metric).unwrap()];
            if values.is_empty() {
                prop_assert!(cell.is_empty());
            } else {
                let best = match direction {
                    ObjectiveDirection::Minimize => values.iter().copied().fold(f64::INFINITY, f64::min),
                    ObjectiveDirection::Maximize => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                };
                prop_assert!((cell.parse::<f64>().unwrap() - best).abs() < 1e-9);
            }
        }
        prop_assert_eq!(&row.cells()[columns.offset("lr").unwrap()], "0.1");
    }

    /// Property: Unsucceeded trials never show metric values
    #[test]
    fn prop_pivot_unsucceeded_metrics_empty(log in arb_log(30), direction in arb_direction()) {
        let objective = objective(direction);
        let columns = ColumnIndex::assign(&objective, ["lr"]).unwrap();
        let trial = Trial::builder("trial-p", objective.clone())
            .condition("Running", false)
            .parameter("lr", "0.1")
            .build();

        let row = pivot_row(&columns, direction, &trial, Some(&log)).unwrap();
        prop_assert!(row.cells()[..columns.metric_count()].iter().all(String::is_empty));
        prop_assert_eq!(row.state(), "Running");
    }
}
