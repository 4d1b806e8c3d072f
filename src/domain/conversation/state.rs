//! Consultation state machine.
//!
//! Two states only: a consultation is either idle or holding a placeholder
//! turn whose completion will run on the next processing pass.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle state of a consulting conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationState {
    /// No request is outstanding; input is accepted.
    #[default]
    Idle,

    /// A placeholder assistant turn is the last element and awaits resolution.
    AwaitingCompletion,
}

impl ConsultationState {
    /// Returns true if the operator may submit a new turn.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a deferred completion must run on the next pass.
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingCompletion)
    }
}

impl StateMachine for ConsultationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConsultationState::*;
        matches!((self, target), (Idle, AwaitingCompletion) | (AwaitingCompletion, Idle))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConsultationState::*;
        match self {
            Idle => vec![AwaitingCompletion],
            AwaitingCompletion => vec![Idle],
        }
    }
}
