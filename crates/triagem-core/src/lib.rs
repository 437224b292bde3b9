//! triagem-core
//!
//! Pure domain types shared by every triagem crate: session ids, severity and
//! risk levels, response sets, sessions and the final score result.
//! No scoring logic lives here.

pub mod error;
pub mod models;
pub mod session_id;
