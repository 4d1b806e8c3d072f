//! Strategic Analyst - LLM-backed thesis evaluation and consulting chat.
//!
//! Operators submit free-text business theses and receive SWOT-style verdicts
//! from a remote chat-completion API, or hold a free-form consulting dialogue.
//! The crate owns request orchestration (retry/backoff), the two-phase
//! conversation state machine, the batch analysis pipeline and the
//! response-to-record parser. Rendering is left to the host.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
