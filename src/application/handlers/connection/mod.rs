//! Connectivity check.

mod check_connection;

pub use check_connection::{CheckConnectionHandler, MISSING_KEY_MESSAGE};
