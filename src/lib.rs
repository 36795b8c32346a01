#![doc(test(attr(deny(warnings))))]

//! Bakery Core keeps the books for one bakery day: flour going into the
//! ovens, bread going out with the distributors, side sales over the
//! counter, and the settlement figures derived from all of it.

pub mod cli;
pub mod errors;
pub mod format;
pub mod ledger;
pub mod report;
pub mod settings;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bakery Core tracing initialized.");
    });
}
