//! Posture analysis over a strength snapshot
//!
//! - `engine`: rule evaluation producing ranked [`PostureIssue`]s
//! - `statistics`: aggregate counts over a snapshot
//! - `severity`: three-tier classification of severity scores
//!
//! Everything here is pure: no I/O, no shared state, safe to re-run on every
//! state change.

pub mod engine;
pub mod severity;
pub mod statistics;

pub use engine::{evaluate, evaluate_rule, strength_value, PostureIssue, TriggeredBy};
pub use severity::SeverityTier;
pub use statistics::MuscleStatistics;
