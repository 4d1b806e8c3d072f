//! Consultation aggregate - the two-phase conversational protocol.
//!
//! Submitting input and performing the network call happen on different
//! processing passes so the host can re-render (showing the placeholder as a
//! "thinking" indicator) before the potentially slow call blocks:
//!
//! 1. `submit` appends the user turn and a placeholder assistant turn and
//!    moves to `AwaitingCompletion`.
//! 2. On the next pass the caller reads `pending_history`, performs the
//!    completion, then calls `complete` (placeholder replaced by the reply)
//!    or `fail` (placeholder and user turn both removed).
//!
//! # Invariants
//!
//! - At most one placeholder exists and, while awaiting, it is the last turn.
//! - A resolved placeholder is never retained.

use thiserror::Error;

use super::conversation::Conversation;
use super::message::ChatMessage;
use super::state::ConsultationState;
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};

/// Reasons a submission is rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    /// Input was empty or whitespace only.
    #[error("message content cannot be empty")]
    EmptyInput,

    /// No credential is configured; the user turn was not kept.
    #[error("API key is missing")]
    MissingCredential,

    /// A previous submission has not been resolved yet.
    #[error("a response is already pending")]
    AlreadyPending,
}

/// A consulting conversation plus its protocol state.
#[derive(Debug, Clone, Default)]
pub struct Consultation {
    conversation: Conversation,
    state: ConsultationState,
}

impl Consultation {
    /// Creates an empty, idle consultation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConsultationState {
        self.state
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Submits a user turn.
    ///
    /// With a credential, appends the turn plus the placeholder and enters
    /// `AwaitingCompletion`. Without one, the turn is appended and removed
    /// again so the conversation is left exactly as it was.
    pub fn submit(
        &mut self,
        content: impl Into<String>,
        credential_present: bool,
    ) -> Result<(), SubmitRejection> {
        if !self.state.accepts_user_input() {
            return Err(SubmitRejection::AlreadyPending);
        }

        let content = content.into();
        if content.trim().is_empty() {
            return Err(SubmitRejection::EmptyInput);
        }

        self.conversation.push(ChatMessage::user(content));

        if !credential_present {
            self.conversation.pop();
            return Err(SubmitRejection::MissingCredential);
        }

        self.conversation.push(ChatMessage::placeholder());
        self.state = ConsultationState::AwaitingCompletion;
        Ok(())
    }

    /// Returns the history to send (every turn except the placeholder).
    ///
    /// `None` unless awaiting and the last turn is still the placeholder.
    pub fn pending_history(&self) -> Option<&[ChatMessage]> {
        if !self.state.is_awaiting() {
            return None;
        }
        match self.conversation.last() {
            Some(last) if last.is_placeholder() => {
                let messages = self.conversation.messages();
                Some(&messages[..messages.len() - 1])
            }
            _ => None,
        }
    }

    /// Replaces the placeholder with the model's reply.
    pub fn complete(&mut self, reply: impl Into<String>) -> Result<(), DomainError> {
        self.take_placeholder()?;
        self.conversation.push(ChatMessage::assistant(reply));
        Ok(())
    }

    /// Removes the placeholder and the user turn that triggered it.
    pub fn fail(&mut self) -> Result<(), DomainError> {
        self.take_placeholder()?;
        if self.conversation.last().is_some_and(|m| m.is_user()) {
            self.conversation.pop();
        }
        Ok(())
    }

    /// Discards all turns and returns to `Idle` unconditionally.
    pub fn clear(&mut self) {
        self.conversation.clear();
        self.state = ConsultationState::Idle;
    }

    fn take_placeholder(&mut self) -> Result<(), DomainError> {
        if self.pending_history().is_none() {
            return Err(
                DomainError::new(ErrorCode::NothingPending, "No completion is pending")
                    .with_detail("state", format!("{:?}", self.state)),
            );
        }
        self.state = self
            .state
            .transition_to(ConsultationState::Idle)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        self.conversation.pop();
        Ok(())
    }
}
