//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, error types, the state machine trait and text
//! helpers that form the vocabulary of the analyst domain.

mod errors;
mod ids;
mod state_machine;
mod text;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use text::truncate_chars;
