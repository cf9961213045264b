//! Experiment Schema
//!
//! Read-only inputs to the aggregation builders. Every value here is
//! request-scoped: produced by a collaborator, consumed by one build,
//! never cached.
//!
//! ## Schema Overview
//!
//! ```text
//! ObjectiveSpec (1) ──< Trial (N)
//!                         │
//!                         ├──< TrialCondition (N) [arrival order]
//!                         ├──< ParameterAssignment (N)
//!                         └──  ObservationLog (1) ──< Observation (N) [arrival order]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use trueno_trials::experiment::{ObjectiveDirection, ObjectiveSpec, Observation, Trial};
//!
//! let objective = ObjectiveSpec::builder(ObjectiveDirection::Minimize, "loss")
//!     .additional_metric("accuracy")
//!     .build();
//!
//! let trial = Trial::builder("trial-001", objective)
//!     .condition("Created", false)
//!     .condition("Succeeded", true)
//!     .parameter("lr", "0.01")
//!     .build();
//!
//! assert!(trial.is_succeeded());
//! assert_eq!(trial.current_state(), "Succeeded");
//!
//! let obs = Observation::new("loss", "2021-01-01T00:00:00.5Z", "0.3");
//! assert_eq!(obs.metric_name(), "loss");
//! ```

mod objective;
mod observation;
mod trial;

pub use objective::{ObjectiveDirection, ObjectiveSpec, ObjectiveSpecBuilder};
pub use observation::{Observation, ObservationLog};
pub use trial::{ParameterAssignment, Trial, TrialBuilder, TrialCondition};
