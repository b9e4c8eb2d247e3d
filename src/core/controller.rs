//! Drives a [`BalanceView`] with data from a [`BalanceService`].
//!
//! Every public operation performs its collaborator call, feeds the outcome
//! to the view and then answers whatever the view queued, so the view is
//! settled again when the call returns.

use std::sync::Arc;

use crate::config::Config;
use crate::core::dates::DateValidator;
use crate::core::services::{BalanceService, ServiceResult};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{Client, Invoice, Revenue};
use crate::errors::{CollaboratorError, ViewError, ViewResult};
use crate::view::{BalanceView, ErrorScope, Request, ViewObserver};

pub struct BalanceController<S: BalanceService> {
    view: BalanceView,
    service: S,
    validator: DateValidator,
}

impl<S: BalanceService> BalanceController<S> {
    pub fn new(service: S) -> Self {
        Self::with_clock(service, Arc::new(SystemClock))
    }

    pub fn with_clock(service: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            view: BalanceView::with_clock(Arc::clone(&clock)),
            service,
            validator: DateValidator::new(clock),
        }
    }

    /// Like [`BalanceController::with_clock`], honoring the configured
    /// year window for entered dates.
    pub fn with_config(service: S, clock: Arc<dyn Clock>, config: &Config) -> Self {
        Self {
            view: BalanceView::with_clock(Arc::clone(&clock)),
            service,
            validator: DateValidator::with_year_span(clock, config.year_span),
        }
    }

    pub fn view(&self) -> &BalanceView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut BalanceView {
        &mut self.view
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Direct access to the collaborator. Changes made through it reach the
    /// view only with the next fetch.
    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn into_service(self) -> S {
        self.service
    }

    /// Changes how far back entered dates may reach.
    pub fn set_year_span(&mut self, year_span: i32) {
        self.validator.set_year_span(year_span);
    }

    pub fn subscribe(&mut self, observer: impl ViewObserver + 'static) {
        self.view.subscribe(observer);
    }

    /// Loads the roster and the year choices; the current year ends up
    /// selected with its invoices in the ledger.
    pub fn initialize_view(&mut self) -> ViewResult<()> {
        self.all_clients()?;
        self.years_of_the_invoices()
    }

    pub fn all_clients(&mut self) -> ViewResult<()> {
        match self.service.find_all_clients() {
            Ok(clients) => {
                self.view.replace_all_clients(clients);
                self.pump();
                Ok(())
            }
            Err(err) => Err(self.report(ErrorScope::Client, err)),
        }
    }

    pub fn years_of_the_invoices(&mut self) -> ViewResult<()> {
        self.fetch_years()
            .map_err(|err| self.report(ErrorScope::Invoice, err))?;
        self.pump();
        Ok(())
    }

    pub fn all_invoices_by_year(&mut self, year: i32) -> ViewResult<()> {
        self.fetch_invoices(year, None)
            .map_err(|err| self.report(ErrorScope::Invoice, err))?;
        self.pump();
        Ok(())
    }

    pub fn all_invoices_by_client_and_year(&mut self, client: &Client, year: i32) -> ViewResult<()> {
        self.fetch_invoices(year, Some(client))
            .map_err(|err| self.report(ErrorScope::Invoice, err))?;
        self.pump();
        Ok(())
    }

    /// Persists `client` and adds it to the roster, selected.
    pub fn new_client(&mut self, client: Client) -> ViewResult<Client> {
        let stored = match self.service.create_client(client.clone()) {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(client = %client, error = %err, "client not created");
                self.view.show_client_error(&err.to_string(), &client);
                return Err(err.into());
            }
        };
        self.view.add_client(stored.clone())?;
        self.pump();
        Ok(stored)
    }

    /// Deletes `client` with its invoices and drops both from the view.
    pub fn delete_client(&mut self, client: &Client) -> ViewResult<()> {
        if let Err(err) = self.service.delete_client(client) {
            tracing::warn!(client = %client, error = %err, "client not deleted");
            self.view.show_client_error(&err.to_string(), client);
            return Err(err.into());
        }
        self.view.remove_client(client);
        self.view.remove_invoices_of_client(client);
        self.pump();
        Ok(())
    }

    pub fn new_invoice(&mut self, invoice: Invoice) -> ViewResult<Invoice> {
        let stored = match self.service.create_invoice(invoice.clone()) {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(invoice = %invoice, error = %err, "invoice not created");
                self.view.show_invoice_error(&err.to_string(), &invoice);
                return Err(err.into());
            }
        };
        self.view.add_invoice(stored.clone());
        self.pump();
        Ok(stored)
    }

    /// Validates the date fields, then creates the invoice. A rejected date
    /// is shown as the invoice error and nothing else changes.
    pub fn add_invoice_from_fields(
        &mut self,
        client: &Client,
        day: u32,
        month: u32,
        year: i32,
        revenue: Revenue,
    ) -> ViewResult<Invoice> {
        let date = match self.validator.build_date(day, month, year) {
            Ok(date) => date,
            Err(err) => {
                self.view.show_error(ErrorScope::Invoice, err.to_string());
                return Err(ViewError::InvalidDate(err));
            }
        };
        self.new_invoice(Invoice::new(client.clone(), date, revenue))
    }

    pub fn delete_invoice(&mut self, invoice: &Invoice) -> ViewResult<()> {
        if let Err(err) = self.service.delete_invoice(invoice) {
            tracing::warn!(invoice = %invoice, error = %err, "invoice not deleted");
            self.view.show_invoice_error(&err.to_string(), invoice);
            return Err(err.into());
        }
        self.view.remove_invoice(invoice);
        self.pump();
        Ok(())
    }

    pub fn select_year(&mut self, year: i32) -> ViewResult<()> {
        self.view.select_year(year)?;
        self.pump();
        Ok(())
    }

    pub fn select_client(&mut self, client: Option<&Client>) -> ViewResult<()> {
        self.view.select_client(client)?;
        self.pump();
        Ok(())
    }

    pub fn show_all_invoices(&mut self) {
        self.view.show_all_invoices();
        self.pump();
    }

    pub fn select_invoice(&mut self, row: Option<usize>) -> ViewResult<()> {
        self.view.select_invoice(row)
    }

    /// Answers queued view requests until none remain. Invoice fetches for a
    /// scope that is no longer active are dropped.
    pub fn pump(&mut self) {
        while let Some(request) = self.view.next_request() {
            if !self.view.is_current_scope(&request) {
                tracing::debug!(?request, "stale request skipped");
                continue;
            }
            let outcome = match &request {
                Request::FetchYears => self.fetch_years(),
                Request::FetchInvoices { year, client } => {
                    self.fetch_invoices(*year, client.as_ref())
                }
            };
            if let Err(err) = outcome {
                self.report(ErrorScope::Invoice, err);
            }
        }
    }

    fn fetch_years(&mut self) -> ServiceResult<()> {
        let years = self.service.find_years_of_the_invoices()?;
        self.view.set_choice_years(years);
        Ok(())
    }

    fn fetch_invoices(&mut self, year: i32, client: Option<&Client>) -> ServiceResult<()> {
        let invoices = match client {
            Some(client) => self.service.find_invoices_by_client_and_year(client, year)?,
            None => self.service.find_invoices_by_year(year)?,
        };
        self.view.replace_all_invoices(invoices);
        Ok(())
    }

    fn report(&mut self, scope: ErrorScope, err: CollaboratorError) -> ViewError {
        tracing::warn!(?scope, error = %err, "collaborator request failed");
        self.view.show_error(scope, err.to_string());
        ViewError::Collaborator(err)
    }
}
