//! Conversation domain module.
//!
//! Chat turns, the ordered conversation, and the consultation aggregate that
//! defers each completion across one host re-render.

mod consultation;
mod conversation;
mod message;
mod state;

pub use consultation::{Consultation, SubmitRejection};
pub use conversation::Conversation;
pub use message::{ChatMessage, Role, PLACEHOLDER_CONTENT};
pub use state::ConsultationState;
