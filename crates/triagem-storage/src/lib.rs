//! triagem-storage
//!
//! Persistence seams for the session manager: where live sessions are kept
//! and where finalized results go. In-memory implementations for services
//! and tests, JSON files on local disk for the CLI.

pub mod error;
pub mod results;
pub mod sessions;
pub mod state;
