use thiserror::Error;

use crate::domain::conversation::SubmitRejection;
use crate::domain::foundation::DomainError;
use crate::ports::TransportError;

/// Errors surfaced by the consultant chat.
#[derive(Debug, Clone, Error)]
pub enum ConsultantError {
    #[error("Введите сообщение")]
    EmptyInput,

    #[error("Введите API ключ")]
    MissingCredential,

    #[error("Дождитесь ответа на предыдущее сообщение")]
    AlreadyPending,

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<SubmitRejection> for ConsultantError {
    fn from(rejection: SubmitRejection) -> Self {
        match rejection {
            SubmitRejection::EmptyInput => ConsultantError::EmptyInput,
            SubmitRejection::MissingCredential => ConsultantError::MissingCredential,
            SubmitRejection::AlreadyPending => ConsultantError::AlreadyPending,
        }
    }
}

impl From<DomainError> for ConsultantError {
    fn from(err: DomainError) -> Self {
        ConsultantError::Domain(err.to_string())
    }
}
