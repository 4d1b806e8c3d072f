//! Application layer - command handlers over the domain and ports.
//!
//! Handlers take the [`AnalystSession`](crate::domain::session::AnalystSession)
//! they act on by mutable reference; each interactive session owns its own.

pub mod handlers;

pub use handlers::*;
