//! Column index assignment for the trial pivot table
//!
//! Layout (fixed for the lifetime of one build):
//!
//! ```text
//! offset:  0          1 ..= k               k+1 ..
//!          primary    additional metrics    parameters (declared order)
//! ```

use rustc_hash::FxHashMap;

use crate::experiment::ObjectiveSpec;
use crate::{Error, Result};

/// Which block of the pivot row a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Best observed value of a metric.
    Metric,
    /// Value assigned to a parameter.
    Parameter,
}

/// Bijective mapping from metric and parameter names to row offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    names: Vec<String>,
    offsets: FxHashMap<String, usize>,
    metric_count: usize,
}

impl ColumnIndex {
    /// Assign offsets: metrics first (primary, then additional in declared
    /// order), parameters next in declared order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaViolation`] if a name is declared twice
    /// (including a parameter sharing a metric's name).
    pub fn assign<I, S>(objective: &ObjectiveSpec, parameter_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self {
            names: Vec::new(),
            offsets: FxHashMap::default(),
            metric_count: 0,
        };
        for metric in objective.metric_names() {
            index.insert(metric)?;
        }
        index.metric_count = index.names.len();
        for parameter in parameter_names {
            index.insert(parameter.as_ref())?;
        }
        Ok(index)
    }

    fn insert(&mut self, name: &str) -> Result<()> {
        let offset = self.names.len();
        if self.offsets.insert(name.to_string(), offset).is_some() {
            return Err(Error::SchemaViolation(format!(
                "column '{name}' is declared more than once"
            )));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Offset of a name, if assigned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.offsets.get(name).copied()
    }

    /// Offset of a name that must have been declared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaViolation`] if `name` was never assigned.
    pub fn offset(&self, name: &str) -> Result<usize> {
        self.get(name).ok_or_else(|| {
            Error::SchemaViolation(format!("'{name}' is not a declared metric or parameter"))
        })
    }

    /// Which block an assigned offset belongs to.
    #[must_use]
    pub const fn kind(&self, offset: usize) -> ColumnKind {
        if offset < self.metric_count {
            ColumnKind::Metric
        } else {
            ColumnKind::Parameter
        }
    }

    /// Column names in offset order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of metric columns.
    #[must_use]
    pub const fn metric_count(&self) -> usize {
        self.metric_count
    }

    /// Number of parameter columns.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.names.len() - self.metric_count
    }

    /// Total number of columns (metrics + parameters).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no columns were assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
