#![doc(test(attr(deny(warnings))))]

//! Finance Tracker keeps a single-user ledger of plans (expenses) and
//! allowances (income), persists it as JSON, and reports balances and
//! upcoming due dates.

pub mod config;
pub mod currency;
pub mod errors;
pub mod input;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Tracker tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
