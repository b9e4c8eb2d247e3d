//! Engine-independent building blocks: time, ordering, date validation, the
//! collaborator seam and the controller that drives the view.

pub mod controller;
pub mod dates;
pub mod ordering;
pub mod services;
pub mod time;

pub use controller::BalanceController;
pub use dates::{build_date, DateValidator};
pub use time::{Clock, FixedClock, SystemClock};
