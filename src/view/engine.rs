//! The synchronization engine.
//!
//! [`BalanceView`] owns the roster, the ledger and the year choices, derives
//! the revenue label from them and decides when the collaborator has to be
//! asked for fresh data. It never calls the collaborator itself: requests are
//! queued and answered by whoever drives the view (see
//! [`crate::core::BalanceController`]).

use std::collections::VecDeque;
use std::sync::Arc;

use crate::core::time::{Clock, SystemClock};
use crate::domain::{Client, Invoice};
use crate::errors::ViewResult;

use super::invoices::InvoiceLedger;
use super::revenue::revenue_label;
use super::roster::ClientRoster;
use super::snapshot::{ScopeState, ViewObserver, ViewSnapshot};
use super::years::YearChoices;

/// Data the view needs from the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Years for which invoices exist, answered with `set_choice_years`.
    FetchYears,
    /// Invoices of one scope, answered with `replace_all_invoices`.
    FetchInvoices { year: i32, client: Option<Client> },
}

/// Context an error message is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    Client,
    Invoice,
}

pub struct BalanceView {
    clock: Arc<dyn Clock>,
    roster: ClientRoster,
    ledger: InvoiceLedger,
    years: YearChoices,
    revenue_label: String,
    client_error: Option<String>,
    invoice_error: Option<String>,
    pending: VecDeque<Request>,
    observers: Vec<Box<dyn ViewObserver>>,
    revision: u64,
}

impl Default for BalanceView {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceView {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            roster: ClientRoster::new(),
            ledger: InvoiceLedger::new(),
            years: YearChoices::new(),
            revenue_label: String::new(),
            client_error: None,
            invoice_error: None,
            pending: VecDeque::new(),
            observers: Vec::new(),
            revision: 0,
        }
    }

    pub fn subscribe(&mut self, observer: impl ViewObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ---------------------------------------------------------------------
    // Roster
    // ---------------------------------------------------------------------

    /// Replaces the roster, skipping duplicates. Returns how many were skipped.
    pub fn replace_all_clients(&mut self, clients: impl IntoIterator<Item = Client>) -> usize {
        let skipped = self.track_scope(|view| view.roster.replace_all(clients));
        self.publish();
        skipped
    }

    /// Inserts `client` in order and selects it.
    pub fn add_client(&mut self, client: Client) -> ViewResult<usize> {
        let index = self.track_scope(|view| view.roster.add(client))?;
        self.client_error = None;
        self.publish();
        Ok(index)
    }

    /// Removes `client` from the roster. The client selection is always
    /// cleared.
    pub fn remove_client(&mut self, client: &Client) -> Option<Client> {
        let removed = self.track_scope(|view| view.roster.remove(client));
        self.publish();
        removed
    }

    pub fn select_client(&mut self, client: Option<&Client>) -> ViewResult<()> {
        self.track_scope(|view| view.roster.select(client))?;
        self.publish();
        Ok(())
    }

    /// Drops the client filter so the ledger shows every invoice of the year.
    pub fn show_all_invoices(&mut self) {
        self.track_scope(|view| view.roster.clear_selection());
        self.publish();
    }

    // ---------------------------------------------------------------------
    // Ledger
    // ---------------------------------------------------------------------

    /// Materializes the active scope from a collaborator answer.
    pub fn replace_all_invoices(&mut self, invoices: impl IntoIterator<Item = Invoice>) {
        self.ledger.replace_all(invoices);
        if self.ledger.is_empty() {
            self.on_empty_ledger();
        }
        self.refresh_revenue();
        self.publish();
    }

    /// Records a committed invoice. Its year joins the year choices; the
    /// invoice itself is shown only when it belongs to the active scope.
    /// Returns whether it entered the ledger.
    pub fn add_invoice(&mut self, invoice: Invoice) -> bool {
        let year = invoice.year();
        if !self.years.is_empty() && self.years.insert(year) {
            tracing::debug!(year, "year added to choices");
        }
        self.invoice_error = None;
        let in_scope = self.years.selected() == Some(year)
            && self
                .roster
                .selected()
                .map_or(true, |client| invoice.is_for(client));
        if in_scope {
            let row = self.ledger.insert(invoice);
            tracing::debug!(row, "invoice inserted");
            self.refresh_revenue();
        }
        self.publish();
        in_scope
    }

    pub fn remove_invoice(&mut self, invoice: &Invoice) -> Option<Invoice> {
        let removed = self.ledger.remove(invoice)?;
        if self.ledger.is_empty() {
            self.on_empty_ledger();
        }
        self.refresh_revenue();
        self.publish();
        Some(removed)
    }

    /// Drops every invoice of `client`, whatever the client filter is.
    pub fn remove_invoices_of_client(&mut self, client: &Client) -> usize {
        let removed = self.ledger.remove_of_client(client);
        if self.ledger.is_empty() {
            self.on_empty_ledger();
        }
        self.refresh_revenue();
        self.publish();
        removed
    }

    pub fn select_invoice(&mut self, row: Option<usize>) -> ViewResult<()> {
        self.ledger.select(row)?;
        self.publish();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Years
    // ---------------------------------------------------------------------

    /// Rebuilds the year choices around the current year and selects it.
    pub fn set_choice_years(&mut self, years: impl IntoIterator<Item = i32>) {
        let current_year = self.clock.current_year();
        self.track_scope(|view| view.years.set_choice(years, current_year));
        self.publish();
    }

    pub fn select_year(&mut self, year: i32) -> ViewResult<()> {
        self.track_scope(|view| view.years.select(year))?;
        self.publish();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Errors
    // ---------------------------------------------------------------------

    pub fn show_client_error(&mut self, message: &str, client: &Client) {
        self.show_error(ErrorScope::Client, format!("{message}: {}", client.identifier()));
    }

    pub fn show_invoice_error(&mut self, message: &str, invoice: &Invoice) {
        self.show_error(ErrorScope::Invoice, format!("{message}: {invoice}"));
    }

    pub fn show_error(&mut self, scope: ErrorScope, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?scope, %message, "error shown");
        match scope {
            ErrorScope::Client => self.client_error = Some(message),
            ErrorScope::Invoice => self.invoice_error = Some(message),
        }
        self.publish();
    }

    /// Dismisses both error messages. Publishes only if one was shown.
    pub fn clear_errors(&mut self) {
        if self.client_error.is_none() && self.invoice_error.is_none() {
            return;
        }
        self.client_error = None;
        self.invoice_error = None;
        self.publish();
    }

    // ---------------------------------------------------------------------
    // Requests
    // ---------------------------------------------------------------------

    pub fn next_request(&mut self) -> Option<Request> {
        self.pending.pop_front()
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        self.pending.drain(..).collect()
    }

    pub fn pending_requests(&self) -> impl Iterator<Item = &Request> {
        self.pending.iter()
    }

    /// False for an invoice fetch whose scope is no longer the active one.
    pub fn is_current_scope(&self, request: &Request) -> bool {
        match request {
            Request::FetchYears => true,
            Request::FetchInvoices { year, client } => {
                self.years.selected() == Some(*year) && self.roster.selected() == client.as_ref()
            }
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn clients(&self) -> &[Client] {
        self.roster.clients()
    }

    pub fn invoices(&self) -> &[Invoice] {
        self.ledger.invoices()
    }

    pub fn years(&self) -> &[i32] {
        self.years.years()
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.years.selected()
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.roster.selected()
    }

    pub fn selected_invoice(&self) -> Option<usize> {
        self.ledger.selected_row()
    }

    pub fn revenue_label(&self) -> &str {
        &self.revenue_label
    }

    pub fn client_error(&self) -> Option<&str> {
        self.client_error.as_deref()
    }

    pub fn invoice_error(&self) -> Option<&str> {
        self.invoice_error.as_deref()
    }

    pub fn roster(&self) -> &ClientRoster {
        &self.roster
    }

    pub fn ledger(&self) -> &InvoiceLedger {
        &self.ledger
    }

    pub fn current_year(&self) -> i32 {
        self.clock.current_year()
    }

    pub fn scope(&self) -> ScopeState {
        ScopeState::from_selection(self.years.selected(), self.roster.selected())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            revision: self.revision,
            clients: self.roster.clients().to_vec(),
            invoices: self.ledger.invoices().to_vec(),
            years: self.years.years().to_vec(),
            selected_year: self.years.selected(),
            selected_client: self.roster.selected().cloned(),
            selected_invoice: self.ledger.selected_row(),
            revenue_label: self.revenue_label.clone(),
            scope: self.scope(),
            client_error: self.client_error.clone(),
            invoice_error: self.invoice_error.clone(),
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn active_scope(&self) -> Option<(i32, Option<Client>)> {
        self.years
            .selected()
            .map(|year| (year, self.roster.selected().cloned()))
    }

    /// Runs a selection change and queues one fetch if it moved the view
    /// into a different active scope.
    fn track_scope<T>(&mut self, change: impl FnOnce(&mut Self) -> T) -> T {
        let before = self.active_scope();
        let before_state = self.scope();
        let outcome = change(self);
        let after = self.active_scope();
        if after != before {
            tracing::debug!(from = ?before_state, to = ?self.scope(), "scope changed");
            if let Some((year, client)) = after {
                self.queue(Request::FetchInvoices { year, client });
            }
        }
        outcome
    }

    /// Asks for fresh year choices when a past year empties without a client
    /// filter. The current year is always a choice.
    fn on_empty_ledger(&mut self) {
        let current_year = Some(self.clock.current_year());
        if self.roster.selected().is_none() && self.years.selected() != current_year {
            self.queue(Request::FetchYears);
        }
    }

    fn queue(&mut self, request: Request) {
        match &request {
            Request::FetchYears if self.pending.contains(&request) => return,
            Request::FetchInvoices { .. } => self
                .pending
                .retain(|pending| !matches!(pending, Request::FetchInvoices { .. })),
            _ => {}
        }
        tracing::debug!(?request, "request queued");
        self.pending.push_back(request);
    }

    fn refresh_revenue(&mut self) {
        self.revenue_label = revenue_label(
            self.years.selected(),
            self.roster.selected(),
            self.ledger.invoices(),
        );
    }

    fn publish(&mut self) {
        self.revision += 1;
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in self.observers.iter_mut() {
            observer.on_snapshot(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::domain::Revenue;
    use crate::errors::ViewError;
    use chrono::NaiveDate;

    const YEAR: i32 = 2019;

    fn view() -> BalanceView {
        BalanceView::with_clock(Arc::new(FixedClock::in_year(YEAR)))
    }

    fn invoice(client: &Client, month: u32, day: u32, cents: u64) -> Invoice {
        let date = NaiveDate::from_ymd_opt(YEAR, month, day).unwrap();
        Invoice::new(client.clone(), date, Revenue::from_cents(cents))
    }

    #[test]
    fn set_choice_years_queues_a_fetch_for_the_current_year() {
        let mut view = view();
        view.set_choice_years(vec![YEAR - 1]);
        assert_eq!(view.years(), [YEAR, YEAR - 1]);
        assert_eq!(view.selected_year(), Some(YEAR));
        assert_eq!(
            view.take_requests(),
            vec![Request::FetchInvoices { year: YEAR, client: None }]
        );
    }

    #[test]
    fn reselecting_the_same_scope_queues_nothing() {
        let mut view = view();
        view.set_choice_years(vec![YEAR]);
        view.take_requests();
        view.select_year(YEAR).unwrap();
        view.set_choice_years(Vec::new());
        assert!(view.take_requests().is_empty());
    }

    #[test]
    fn selecting_a_client_scopes_the_next_fetch() {
        let mut view = view();
        let x = Client::new("x");
        view.replace_all_clients(vec![x.clone()]);
        view.set_choice_years(Vec::new());
        view.take_requests();

        view.select_client(Some(&x)).unwrap();
        assert_eq!(view.scope(), ScopeState::ClientAndYearSelected);
        assert_eq!(
            view.take_requests(),
            vec![Request::FetchInvoices { year: YEAR, client: Some(x) }]
        );
    }

    #[test]
    fn a_newer_scope_supersedes_a_queued_fetch() {
        let mut view = view();
        view.set_choice_years(vec![YEAR - 1]);
        view.select_year(YEAR - 1).unwrap();
        assert_eq!(
            view.take_requests(),
            vec![Request::FetchInvoices { year: YEAR - 1, client: None }]
        );
    }

    #[test]
    fn empty_replace_without_client_requests_years_once() {
        let mut view = view();
        view.set_choice_years(vec![YEAR - 2]);
        view.select_year(YEAR - 2).unwrap();
        view.take_requests();
        view.replace_all_invoices(Vec::new());
        view.replace_all_invoices(Vec::new());
        assert_eq!(view.take_requests(), vec![Request::FetchYears]);
        assert_eq!(view.revenue_label(), "no invoices exist for 2017");
    }

    #[test]
    fn empty_current_year_only_updates_the_label() {
        let mut view = view();
        view.set_choice_years(vec![YEAR - 2]);
        view.take_requests();
        view.replace_all_invoices(Vec::new());
        assert!(view.take_requests().is_empty());
        assert_eq!(view.revenue_label(), "no invoices exist for 2019");
    }

    #[test]
    fn add_invoice_outside_the_scope_only_merges_its_year() {
        let mut view = view();
        let x = Client::new("x");
        view.set_choice_years(Vec::new());
        let old = Invoice::new(
            x.clone(),
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            Revenue::from_cents(100),
        );
        assert!(!view.add_invoice(old));
        assert!(view.invoices().is_empty());
        assert_eq!(view.years(), [YEAR, 2015]);
        assert_eq!(view.selected_year(), Some(YEAR));
    }

    #[test]
    fn add_invoice_in_scope_updates_the_label() {
        let mut view = view();
        let x = Client::new("x");
        view.set_choice_years(Vec::new());
        view.replace_all_invoices(vec![invoice(&x, 10, 2, 2000)]);
        assert!(view.add_invoice(invoice(&x, 10, 3, 1000)));
        assert_eq!(view.revenue_label(), "total revenue for 2019 is 30.00");
    }

    #[test]
    fn failed_selection_publishes_nothing() {
        let mut view = view();
        view.set_choice_years(Vec::new());
        let revision = view.revision();
        assert!(matches!(view.select_year(1900), Err(ViewError::UnknownYear(1900))));
        assert!(view.select_client(Some(&Client::new("ghost"))).is_err());
        assert_eq!(view.revision(), revision);
    }

    #[test]
    fn errors_carry_their_subject() {
        let mut view = view();
        let x = Client::new("x");
        view.show_client_error("client not found", &x);
        let bill = invoice(&x, 10, 2, 2000);
        view.show_invoice_error("invoice not found", &bill);
        assert_eq!(view.client_error(), Some("client not found: x"));
        assert_eq!(
            view.invoice_error(),
            Some("invoice not found: x - 02/10/2019 - 20.00")
        );

        view.add_client(Client::new("y")).unwrap();
        assert_eq!(view.client_error(), None);
    }
}
