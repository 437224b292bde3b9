//! triagem-cli
//!
//! Host-side pieces of the `triagem` binary: the on-disk configuration and
//! the adapter that turns legacy Likert labels into canonical answers.

pub mod config;
pub mod likert;
