//! Strength state store
//!
//! - Actions: what can change (`Mutation`)
//! - State: what is true right now (`StoreState`)
//! - Reducer: pure function (State, Mutation) -> State
//! - Codec: export / import documents
//! - Persistence: where state lives between runs
//!
//! The reducer never touches storage. Callers persist the new state after a
//! transition succeeds (see [`crate::session::Session`]).

pub mod actions;
pub mod codec;
pub mod persistence;
pub mod reducer;
pub mod state;

pub use actions::Mutation;
pub use codec::{export_data, import_data, ExportDocument};
pub use persistence::{FileStatePersistence, MemoryStatePersistence, StatePersistence};
pub use reducer::reduce;
pub use state::StoreState;
