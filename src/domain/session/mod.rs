//! Session domain module.
//!
//! One [`AnalystSession`] per interactive session holds everything the
//! operator has configured or produced: credential, model, verbosity toggle,
//! attached file context, the consultation and the last analysis batch.

mod aggregate;
mod connection;

pub use aggregate::{AnalystSession, DEFAULT_MODEL, SUPPORTED_MODELS};
pub use connection::ConnectionStatus;
