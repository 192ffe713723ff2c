//! Notification rules and their persisted dedup state.

pub mod rules;
pub mod state;

pub use rules::*;
pub use state::AlertState;
