#![doc(test(attr(deny(warnings))))]

//! Balance Core keeps a client roster, a year-scoped invoice ledger, the
//! list of selectable years and the derived revenue label consistent while
//! clients and invoices come and go and the year/client filter changes.
//!
//! The [`view::BalanceView`] engine owns that state and queues fetch
//! requests; [`core::controller::BalanceController`] answers them through a
//! [`core::services::BalanceService`] collaborator.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;
pub mod view;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Balance Core tracing initialized.");
    });
}
