//! MuscleMap - Unix tools for muscle strength mapping and posture analysis
//!
//! This library holds the strength state model, the static muscle and rule
//! catalogs, and the rule-based posture inference engine shared by the
//! `muscle-state`, `posture-analyze` and `muscle-catalog` binaries.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod session;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use analysis::{evaluate, PostureIssue, SeverityTier};
pub use catalog::{Catalog, RuleCatalog};
pub use config::Config;
pub use error::{MuscleMapError, Result};
pub use session::Session;
pub use types::{Language, MuscleStateMap, StrengthLevel, ViewSide};
