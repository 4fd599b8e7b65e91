//! Session facade tying the catalog, the store and persistence together
//!
//! Every front end goes through `Session` so the same rules apply
//! everywhere: transitions are computed by the pure reducer, saved, and
//! only then become the current state.
//!
//! ```no_run
//! use libmusclemap::{Catalog, Session, StrengthLevel};
//! use libmusclemap::store::FileStatePersistence;
//!
//! # fn example() -> libmusclemap::Result<()> {
//! let catalog = Catalog::builtin()?;
//! let mut session = Session::open(catalog, FileStatePersistence::new("state.json"))?;
//!
//! session.set_strength("neck", StrengthLevel::Weak)?;
//! session.set_strength("upper_trapezius", StrengthLevel::VeryStrong)?;
//!
//! for issue in session.analyze() {
//!     println!("{} ({})", issue.name_en, issue.severity);
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};

use crate::analysis::{self, MuscleStatistics, PostureIssue};
use crate::catalog::Catalog;
use crate::error::{MuscleMapError, Result};
use crate::store::{self, Mutation, StatePersistence, StoreState};
use crate::types::{StrengthLevel, ViewSide};

pub struct Session<P: StatePersistence> {
    catalog: Catalog,
    persistence: P,
    state: StoreState,
}

impl<P: StatePersistence> Session<P> {
    /// Open a session on the last saved state
    pub fn open(catalog: Catalog, persistence: P) -> Result<Self> {
        let state = persistence.load()?;
        Ok(Self::with_state(catalog, persistence, state))
    }

    /// Open a session on an explicit state, ignoring what is saved
    pub fn with_state(catalog: Catalog, persistence: P, state: StoreState) -> Self {
        Self {
            catalog,
            persistence,
            state,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Apply a mutation, persist the result, then make it current
    ///
    /// If saving fails the current state is left as it was.
    pub fn dispatch(&mut self, mutation: Mutation) -> Result<&StoreState> {
        tracing::debug!(?mutation, "Dispatching mutation");
        let next = store::reduce(self.state.clone(), mutation);
        self.persistence.save(&next)?;
        self.state = next;
        Ok(&self.state)
    }

    pub fn set_strength(&mut self, muscle_id: &str, level: StrengthLevel) -> Result<&StoreState> {
        self.ensure_known_muscle(muscle_id)?;
        self.dispatch(Mutation::SetStrength {
            muscle_id: muscle_id.to_string(),
            level,
        })
    }

    pub fn clear_strength(&mut self, muscle_id: &str) -> Result<&StoreState> {
        self.dispatch(Mutation::ClearStrength(muscle_id.to_string()))
    }

    pub fn select_muscle(&mut self, muscle_id: Option<&str>) -> Result<&StoreState> {
        if let Some(id) = muscle_id {
            self.ensure_known_muscle(id)?;
        }
        self.dispatch(Mutation::SelectMuscle(muscle_id.map(str::to_string)))
    }

    pub fn set_view_side(&mut self, side: ViewSide) -> Result<&StoreState> {
        self.dispatch(Mutation::SetViewSide(side))
    }

    pub fn reset(&mut self) -> Result<&StoreState> {
        self.dispatch(Mutation::ResetAll)
    }

    /// Replace the strength map from an export document
    ///
    /// The payload is fully decoded before anything changes; a malformed
    /// payload returns an error and leaves the state untouched.
    pub fn import(&mut self, payload: &str) -> Result<&StoreState> {
        let muscle_states = store::import_data(payload)?;

        let unknown: Vec<&str> = muscle_states
            .iter()
            .map(|(id, _)| id)
            .filter(|id| !self.catalog.muscles().contains(id))
            .collect();
        if !unknown.is_empty() {
            tracing::warn!(muscles = ?unknown, "Imported muscles not in catalog");
        }

        self.dispatch(Mutation::LoadMap(muscle_states))
    }

    /// Encode the current strength map as an export document
    pub fn export(&self, exported_at: DateTime<Utc>) -> Result<String> {
        Ok(store::export_data(&self.state.muscle_states, exported_at)?)
    }

    /// Ranked posture issues for the current state
    pub fn analyze(&self) -> Vec<PostureIssue> {
        analysis::evaluate(&self.state.muscle_states, self.catalog.rules())
    }

    pub fn statistics(&self) -> MuscleStatistics {
        MuscleStatistics::from_snapshot(&self.state.muscle_states)
    }

    fn ensure_known_muscle(&self, muscle_id: &str) -> Result<()> {
        if self.catalog.muscles().contains(muscle_id) {
            Ok(())
        } else {
            Err(MuscleMapError::InvalidInput(format!(
                "Unknown muscle '{}'. Run `muscle-catalog muscles` to list valid ids",
                muscle_id
            )))
        }
    }
}
