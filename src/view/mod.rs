//! View-state engine: roster, ledger, year choices and the revenue label,
//! kept consistent with each other through [`BalanceView`].

pub mod engine;
pub mod invoices;
pub mod revenue;
pub mod roster;
pub mod snapshot;
pub mod years;

pub use engine::{BalanceView, ErrorScope, Request};
pub use invoices::InvoiceLedger;
pub use revenue::RevenueSummary;
pub use roster::ClientRoster;
pub use snapshot::{ScopeState, SnapshotChange, ViewObserver, ViewSnapshot};
pub use years::YearChoices;
