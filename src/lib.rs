#![doc(test(attr(deny(warnings))))]

//! Expense Core holds the business logic of a personal expense tracker:
//! the expense ledger, budget tracking and alerts, savings goals,
//! gamified levels and badges, spending statistics, weekly tips, and UPI
//! deep links, all over an injected key-value persistence layer.

pub mod core;
pub mod domain;
pub mod errors;
pub mod payment;
pub mod schedule;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
