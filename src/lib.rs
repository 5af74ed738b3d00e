#![doc(test(attr(deny(warnings))))]

//! Sales Ledger groups recorded sales into calendar months, pages through
//! them one month at a time and exports tabular sales reports from an
//! interactive shell.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Sales Ledger tracing initialized.");
    });
}
