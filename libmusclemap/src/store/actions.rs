//! Mutations for the reducer pattern

use crate::types::{MuscleStateMap, StrengthLevel, ViewSide};

/// Everything that can change the store
///
/// Mutations are plain data describing what should happen; `reduce` decides
/// how the state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Mark a muscle's perceived strength
    SetStrength {
        muscle_id: String,
        level: StrengthLevel,
    },

    /// Drop a muscle's entry so it reads as normal again
    ClearStrength(String),

    /// Select a muscle for editing, or clear the selection
    SelectMuscle(Option<String>),

    /// Switch the diagram between front and back
    SetViewSide(ViewSide),

    /// Forget every strength entry and the selection
    ResetAll,

    /// Replace the whole strength map (bulk load or import)
    LoadMap(MuscleStateMap),
}
