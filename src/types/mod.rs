//! Type definitions for the alerting pipelines

pub mod aggregate;
pub mod alert;
pub mod observation;

pub use aggregate::{AggregateValue, DiscrepancyResult};
pub use alert::{AlertKind, AlertMessage};
pub use observation::{AnomalyRecord, Observation, ObservationSet};
