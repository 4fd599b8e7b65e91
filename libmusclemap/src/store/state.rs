//! Store state
//!
//! Transitions happen only through the reducer (see `reducer.rs`).

use serde::{Deserialize, Serialize};

use crate::types::{MuscleStateMap, ViewSide};

/// Root store state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Per-muscle strength assignments
    #[serde(default)]
    pub muscle_states: MuscleStateMap,

    /// Muscle currently selected for editing
    #[serde(default)]
    pub selected_muscle: Option<String>,

    /// Side of the body diagram being viewed
    #[serde(default)]
    pub view_side: ViewSide,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Immutable copy of the strength map for the engine
    pub fn snapshot(&self) -> MuscleStateMap {
        self.muscle_states.clone()
    }
}
