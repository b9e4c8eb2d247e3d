//! The state handed to the presentation layer after every mutation.

use serde::Serialize;

use crate::domain::{Client, Invoice};

/// Which filters are active, derived from the year and client selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeState {
    Idle,
    ClientSelected,
    YearSelected,
    ClientAndYearSelected,
}

impl ScopeState {
    pub fn from_selection(year: Option<i32>, client: Option<&Client>) -> Self {
        match (year, client) {
            (None, None) => ScopeState::Idle,
            (None, Some(_)) => ScopeState::ClientSelected,
            (Some(_), None) => ScopeState::YearSelected,
            (Some(_), Some(_)) => ScopeState::ClientAndYearSelected,
        }
    }

    /// True when a year is selected, so the ledger has a scope to show.
    pub fn has_scope(&self) -> bool {
        matches!(
            self,
            ScopeState::YearSelected | ScopeState::ClientAndYearSelected
        )
    }
}

/// Parts of a snapshot that can change independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotChange {
    Clients,
    Invoices,
    Years,
    Selection,
    Revenue,
    Errors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub revision: u64,
    pub clients: Vec<Client>,
    pub invoices: Vec<Invoice>,
    pub years: Vec<i32>,
    pub selected_year: Option<i32>,
    pub selected_client: Option<Client>,
    pub selected_invoice: Option<usize>,
    pub revenue_label: String,
    pub scope: ScopeState,
    pub client_error: Option<String>,
    pub invoice_error: Option<String>,
}

impl ViewSnapshot {
    /// Lists the parts that differ from `previous`, ignoring the revision.
    pub fn changes_since(&self, previous: &ViewSnapshot) -> Vec<SnapshotChange> {
        let mut changes = Vec::new();
        if self.clients != previous.clients {
            changes.push(SnapshotChange::Clients);
        }
        if self.invoices != previous.invoices {
            changes.push(SnapshotChange::Invoices);
        }
        if self.years != previous.years {
            changes.push(SnapshotChange::Years);
        }
        if self.selected_year != previous.selected_year
            || self.selected_client != previous.selected_client
            || self.selected_invoice != previous.selected_invoice
        {
            changes.push(SnapshotChange::Selection);
        }
        if self.revenue_label != previous.revenue_label {
            changes.push(SnapshotChange::Revenue);
        }
        if self.client_error != previous.client_error
            || self.invoice_error != previous.invoice_error
        {
            changes.push(SnapshotChange::Errors);
        }
        changes
    }
}

/// Receives every snapshot published by the view.
pub trait ViewObserver {
    fn on_snapshot(&mut self, snapshot: &ViewSnapshot);
}

impl<F> ViewObserver for F
where
    F: FnMut(&ViewSnapshot),
{
    fn on_snapshot(&mut self, snapshot: &ViewSnapshot) {
        self(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> ViewSnapshot {
        ViewSnapshot {
            revision: 0,
            clients: Vec::new(),
            invoices: Vec::new(),
            years: Vec::new(),
            selected_year: None,
            selected_client: None,
            selected_invoice: None,
            revenue_label: String::new(),
            scope: ScopeState::Idle,
            client_error: None,
            invoice_error: None,
        }
    }

    #[test]
    fn scope_follows_selection() {
        let client = Client::new("x");
        assert_eq!(ScopeState::from_selection(None, None), ScopeState::Idle);
        assert_eq!(
            ScopeState::from_selection(None, Some(&client)),
            ScopeState::ClientSelected
        );
        assert!(ScopeState::from_selection(Some(2019), Some(&client)).has_scope());
        assert!(!ScopeState::ClientSelected.has_scope());
    }

    #[test]
    fn changes_ignore_revision() {
        let before = empty();
        let mut after = empty();
        after.revision = 7;
        assert!(after.changes_since(&before).is_empty());

        after.years = vec![2019];
        after.selected_year = Some(2019);
        after.client_error = Some("boom: x".into());
        assert_eq!(
            after.changes_since(&before),
            vec![
                SnapshotChange::Years,
                SnapshotChange::Selection,
                SnapshotChange::Errors
            ]
        );
    }

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        {
            let mut observer = |snapshot: &ViewSnapshot| seen.push(snapshot.revision);
            observer.on_snapshot(&empty());
        }
        assert_eq!(seen, vec![0]);
    }
}
