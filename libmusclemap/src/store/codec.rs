//! Export / import documents
//!
//! An export is a JSON object:
//!
//! ```json
//! {
//!   "muscleStates": { "neck": "weak", "upper_trapezius": "very_strong" },
//!   "exportDate": "2025-03-01T09:30:00.000Z"
//! }
//! ```
//!
//! Import reads only `muscleStates`; everything else is ignored.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::types::MuscleStateMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub muscle_states: MuscleStateMap,
    /// ISO-8601, millisecond precision, UTC
    pub export_date: String,
}

impl ExportDocument {
    pub fn new(muscle_states: MuscleStateMap, exported_at: DateTime<Utc>) -> Self {
        Self {
            muscle_states,
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Encode a strength map as a pretty-printed export document
pub fn export_data(muscle_states: &MuscleStateMap, exported_at: DateTime<Utc>) -> Result<String, StateError> {
    let document = ExportDocument::new(muscle_states.clone(), exported_at);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Decode the strength map from an export document
///
/// Fails without side effects; the caller keeps its current state on error.
pub fn import_data(payload: &str) -> Result<MuscleStateMap, StateError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| StateError::InvalidPayload(e.to_string()))?;

    let states = match value.get("muscleStates") {
        None | Some(serde_json::Value::Null) => return Err(StateError::MissingMuscleStates),
        Some(states) => states,
    };

    let muscle_states = MuscleStateMap::deserialize(states)
        .map_err(|e| StateError::InvalidPayload(format!("muscleStates: {}", e)))?;

    tracing::debug!(entries = muscle_states.len(), "Decoded import payload");
    Ok(muscle_states)
}
