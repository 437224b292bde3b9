//! triagem-export
//!
//! Plain-text analysis reports rendered from score results with Tera
//! templates.

pub mod error;
pub mod render;
