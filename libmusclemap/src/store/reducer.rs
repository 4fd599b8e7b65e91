//! Pure reducer for store transitions
//!
//! `(StoreState, Mutation) -> StoreState` with no I/O. Persisting the
//! result is the caller's job.

use super::actions::Mutation;
use super::state::StoreState;
use crate::types::MuscleStateMap;

/// Apply a mutation and return the new state
pub fn reduce(state: StoreState, mutation: Mutation) -> StoreState {
    match mutation {
        Mutation::SetStrength { muscle_id, level } => {
            let mut muscle_states = state.muscle_states;
            muscle_states.set(muscle_id, level);
            StoreState {
                muscle_states,
                ..state
            }
        }

        Mutation::ClearStrength(muscle_id) => {
            let mut muscle_states = state.muscle_states;
            muscle_states.remove(&muscle_id);
            StoreState {
                muscle_states,
                ..state
            }
        }

        Mutation::SelectMuscle(selected_muscle) => StoreState {
            selected_muscle,
            ..state
        },

        Mutation::SetViewSide(view_side) => StoreState { view_side, ..state },

        // View side survives a reset
        Mutation::ResetAll => StoreState {
            muscle_states: MuscleStateMap::new(),
            selected_muscle: None,
            ..state
        },

        Mutation::LoadMap(muscle_states) => StoreState {
            muscle_states,
            ..state
        },
    }
}
