//! Consultant chat handlers.
//!
//! The chat runs in two passes: [`SubmitMessageHandler`] appends the user
//! turn and the placeholder, then [`ResolvePendingHandler`] performs the
//! completion on the following pass.

mod errors;
mod resolve_pending;
mod submit_message;

pub use errors::ConsultantError;
pub use resolve_pending::ResolvePendingHandler;
pub use submit_message::{SubmitMessageCommand, SubmitMessageHandler};
