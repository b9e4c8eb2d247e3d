#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use balance_core::core::FixedClock;
use balance_core::domain::{Client, Invoice, Revenue};
use balance_core::view::{BalanceView, ViewSnapshot};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Year every fixture clock is frozen in.
pub const CURRENT_YEAR: i32 = 2019;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn temp_home() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::in_year(CURRENT_YEAR))
}

pub fn view() -> BalanceView {
    BalanceView::with_clock(clock())
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn invoice(client: &Client, date: NaiveDate, cents: u64) -> Invoice {
    Invoice::new(client.clone(), date, Revenue::from_cents(cents))
}

/// Subscribes a recorder and returns the shared list of published snapshots.
pub fn record(view: &mut BalanceView) -> Rc<RefCell<Vec<ViewSnapshot>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    view.subscribe(move |snapshot: &ViewSnapshot| sink.borrow_mut().push(snapshot.clone()));
    seen
}
