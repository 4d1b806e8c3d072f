//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `conversation` - Chat turns and the two-phase consultation protocol
//! - `analysis` - Analysis records, verdicts and the response parser
//! - `prompts` - Static system prompts and template selection
//! - `session` - Per-operator session state

pub mod analysis;
pub mod conversation;
pub mod foundation;
pub mod prompts;
pub mod session;
