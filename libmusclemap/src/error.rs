//! Error types for MuscleMap

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MuscleMapError>;

#[derive(Error, Debug)]
pub enum MuscleMapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MuscleMapError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MuscleMapError::InvalidInput(_) => 3,
            MuscleMapError::State(StateError::InvalidPayload(_))
            | MuscleMapError::State(StateError::MissingMuscleStates) => 3,
            MuscleMapError::Catalog(_) => 2,
            MuscleMapError::State(_) => 1,
            MuscleMapError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Rejections raised while building a catalog
///
/// A catalog that fails any of these checks is never handed to the engine.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rule at position {0} has an empty id")]
    EmptyRuleId(usize),

    #[error("Duplicate rule id '{0}'")]
    DuplicateRule(String),

    #[error("Rule '{0}' has no weak or strong triggers")]
    EmptyTriggers(String),

    #[error("Rule '{rule}' lists muscle '{muscle}' more than once")]
    DuplicateTrigger { rule: String, muscle: String },

    #[error("Rule '{rule}' references unknown muscle '{muscle}'")]
    UnknownMuscle { rule: String, muscle: String },

    #[error("Muscle at position {0} has an empty id")]
    EmptyMuscleId(usize),

    #[error("Duplicate muscle id '{0}'")]
    DuplicateMuscle(String),
}

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Invalid state payload: {0}")]
    InvalidPayload(String),

    #[error("Payload has no muscleStates field")]
    MissingMuscleStates,

    #[error("State file {path} is unreadable: {message}")]
    CorruptFile { path: String, message: String },

    #[error("State file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}
