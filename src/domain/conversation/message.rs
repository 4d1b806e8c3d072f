//! Chat message value object.
//!
//! A message is a role plus text. Messages are never edited in place; the
//! conversation only appends them or truncates its tail.

use serde::{Deserialize, Serialize};

/// Content of the synthetic assistant turn that marks "response pending".
///
/// The host renders it like any other assistant message (a "thinking"
/// indicator); the next processing pass recognises it as deferred work.
pub const PLACEHOLDER_CONTENT: &str = "Привет! Принял твою ситуацию, анализирую...";

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions (never stored in a session conversation).
    System,
    /// Operator input.
    User,
    /// Model response.
    Assistant,
}

impl Role {
    /// Wire name used by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    /// Creates a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates the pending-response placeholder turn.
    pub fn placeholder() -> Self {
        Self::assistant(PLACEHOLDER_CONTENT)
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns true if this message is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this message is from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    /// Returns true if this is the pending-response sentinel.
    pub fn is_placeholder(&self) -> bool {
        self.role == Role::Assistant && self.content == PLACEHOLDER_CONTENT
    }
}
