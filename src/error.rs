//! Error types for Trueno-Trials
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)
//!
//! Fatal kinds (`FetchFailure`, `SchemaViolation`) abort the whole build.
//! Recoverable kinds (`TimestampParse`, `ValueParse`) are handled where they
//! occur and never escape a builder.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Trueno-Trials error types
#[derive(Error, Debug)]
pub enum Error {
    /// A collaborator could not return data (no partial output is produced)
    #[error("Failed to fetch {resource} '{id}': {reason}")]
    FetchFailure {
        /// Kind of resource being fetched (e.g. "observation log")
        resource: &'static str,
        /// Identifier of the experiment or trial
        id: String,
        /// Collaborator-provided failure reason
        reason: String,
    },

    /// Timestamp is not RFC 3339 (recovered by skipping the observation)
    #[error("Invalid RFC 3339 timestamp '{timestamp}': {reason}")]
    TimestampParse {
        /// The rejected timestamp text
        timestamp: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Name not present in the declared experiment schema
    #[error("Schema violation: {0}\nUpstream experiment metadata is inconsistent. Please report this issue.")]
    SchemaViolation(String),

    /// Metric value is not a decimal number
    #[error("Invalid metric value: {0}")]
    ValueParse(String),

    /// Invalid configuration or argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Arrow export error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON rendering error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::FetchFailure`] for the given resource kind and id.
    pub fn fetch(resource: &'static str, id: impl Into<String>, reason: impl ToString) -> Self {
        Self::FetchFailure {
            resource,
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error aborts a build (as opposed to being recovered
    /// at the point of occurrence).
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::TimestampParse { .. } | Self::ValueParse(_))
    }
}
