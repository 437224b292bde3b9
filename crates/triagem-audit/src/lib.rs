//! triagem-audit
//!
//! Structured audit events for session lifecycle actions, emitted via
//! `tracing` and optionally captured in memory.

pub mod events;
pub mod log;
