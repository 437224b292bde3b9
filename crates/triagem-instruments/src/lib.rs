//! triagem-instruments
//!
//! Screening instrument definitions and the scoring pipeline that runs on
//! them. Pure data and pure functions: no I/O besides optional catalog
//! files.
//!
//! Pipeline: [`validate::validate`] -> [`aggregate::aggregate`] ->
//! [`interpret::classify_total`] / [`interpret::build_detailed_analysis`].

pub mod aggregate;
pub mod builder;
pub mod catalog;
pub mod error;
pub mod instruments;
pub mod interpret;
pub mod scoring;
pub mod validate;

use scoring::Instrument;

/// Return all built-in instruments.
pub fn all_instruments() -> Vec<&'static Instrument> {
    vec![
        instruments::anxiety::definition(),
        instruments::depression::definition(),
        instruments::adhd::definition(),
        instruments::bipolar::definition(),
        instruments::narcissism::definition(),
        instruments::mythomania::definition(),
    ]
}

/// Look up a built-in instrument by ID.
pub fn get_instrument(id: &str) -> Option<&'static Instrument> {
    all_instruments().into_iter().find(|i| i.id == id)
}
