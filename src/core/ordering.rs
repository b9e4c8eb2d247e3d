//! Comparators shared by the roster and the invoice ledger.
//!
//! Both collections insert at the *upper bound* of an item's sort key, so an
//! entry that compares equal to existing ones lands after them and insertion
//! order is preserved among equals.

use std::cmp::Ordering;

use crate::domain::{Client, Invoice};

/// Orders clients by display identifier (case-sensitive, ordinal).
pub fn compare_clients(left: &Client, right: &Client) -> Ordering {
    left.identifier().cmp(right.identifier())
}

/// Orders invoices by date, oldest first.
pub fn compare_invoices(left: &Invoice, right: &Invoice) -> Ordering {
    left.date().cmp(&right.date())
}

/// Index just past every element of the sorted `items` that does not sort
/// after `item`.
pub fn upper_bound<T, F>(items: &[T], item: &T, compare: F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    items.partition_point(|probe| compare(probe, item) != Ordering::Greater)
}
