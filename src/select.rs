//! Best-value selection
//!
//! The single place where objective direction turns into a comparison.
//! Both the time-series builder (same-second duplicates) and the trial
//! matrix builder (best value over a whole log) resolve conflicts here,
//! so they can never disagree on tie-breaking.
//!
//! Rules, with `incumbent` = value already stored, `challenger` = value
//! just observed:
//! - a value that does not parse loses to one that does
//! - neither parses: the challenger wins
//! - Minimize: smaller wins; Maximize: larger wins
//! - equal values: the incumbent stays

use std::cmp::Ordering;

use crate::experiment::ObjectiveDirection;
use crate::{Error, Result};

/// Which side of a comparison won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// The value already stored is kept.
    Incumbent,
    /// The newly observed value replaces it.
    Challenger,
}

/// Parse a reported metric value.
///
/// `NaN` is rejected since it has no ordering against other values.
///
/// # Errors
///
/// Returns [`Error::ValueParse`] if `raw` is not a finite-or-infinite decimal.
pub fn parse_value(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        Ok(_) => Err(Error::ValueParse(format!("'{raw}' is NaN"))),
        Err(e) => Err(Error::ValueParse(format!("'{raw}': {e}"))),
    }
}

/// Stateless comparator for string-encoded metric values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestValueSelector;

impl BestValueSelector {
    /// Decide whether `challenger` beats `incumbent` under `direction`.
    #[must_use]
    pub fn compare(direction: ObjectiveDirection, incumbent: &str, challenger: &str) -> Winner {
        match (parse_value(incumbent), parse_value(challenger)) {
            (Ok(current), Ok(candidate)) => {
                let wanted = match direction {
                    ObjectiveDirection::Minimize => Ordering::Less,
                    ObjectiveDirection::Maximize => Ordering::Greater,
                };
                let improves = candidate.partial_cmp(&current) == Some(wanted);
                if improves {
                    Winner::Challenger
                } else {
                    Winner::Incumbent
                }
            }
            (Ok(_), Err(_)) => Winner::Incumbent,
            // Unparsable incumbent loses; if both fail the most recent wins.
            (Err(_), _) => Winner::Challenger,
        }
    }

    /// Return the winning value of `a` (stored) and `b` (newly seen).
    #[must_use]
    pub fn select<'a>(direction: ObjectiveDirection, a: &'a str, b: &'a str) -> &'a str {
        match Self::compare(direction, a, b) {
            Winner::Incumbent => a,
            Winner::Challenger => b,
        }
    }
}
