//! triagem-session
//!
//! Session lifecycle (`created -> answering -> finalized`) on top of the
//! instrument catalog, plus history comparison and aggregate statistics over
//! persisted results.

pub mod analytics;
pub mod error;
pub mod history;
pub mod manager;
