use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::common::*;
use crate::domain::revenue::Revenue;

const DATE_LABEL_FORMAT: &str = "%d/%m/%Y";

/// A dated revenue entry issued to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    client: Arc<Client>,
    date: NaiveDate,
    revenue: Revenue,
}

impl Invoice {
    /// Creates an invoice that has not been persisted yet.
    pub fn new(client: impl Into<Arc<Client>>, date: NaiveDate, revenue: Revenue) -> Self {
        Self {
            id: None,
            client: client.into(),
            date,
            revenue,
        }
    }

    /// Attaches the service-assigned identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Shared handle to the owning client.
    pub fn client_handle(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn revenue(&self) -> Revenue {
        self.revenue
    }

    /// Whether the invoice belongs to `client`.
    pub fn is_for(&self, client: &Client) -> bool {
        self.client.as_ref() == client
    }

    pub fn date_label(&self) -> String {
        self.date.format(DATE_LABEL_FORMAT).to_string()
    }
}

/// Structural equality on client, date and revenue. The id is ignored so a
/// freshly entered invoice matches its persisted counterpart.
impl PartialEq for Invoice {
    fn eq(&self, other: &Self) -> bool {
        self.client == other.client && self.date == other.date && self.revenue == other.revenue
    }
}

impl Eq for Invoice {}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.client.identifier(),
            self.date_label(),
            self.revenue
        )
    }
}

impl Identifiable for Invoice {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Displayable for Invoice {
    fn display_label(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn equality_ignores_the_id() {
        let client = Client::new("acme");
        let entered = Invoice::new(client.clone(), date(1, 5, 2019), Revenue::from_cents(1020));
        let stored = entered.clone().with_id("42");
        assert_eq!(entered, stored);
        assert!(stored.is_persisted());
        assert_ne!(
            entered,
            Invoice::new(client, date(2, 5, 2019), Revenue::from_cents(1020))
        );
    }

    #[test]
    fn display_lists_client_date_and_amount() {
        let invoice = Invoice::new(Client::new("acme"), date(3, 10, 2019), Revenue::from_cents(1000));
        assert_eq!(invoice.to_string(), "acme - 03/10/2019 - 10.00");
        assert_eq!(invoice.year(), 2019);
    }

    #[test]
    fn clients_are_shared_between_invoices() {
        let client = Arc::new(Client::with_id("7", "acme"));
        let first = Invoice::new(Arc::clone(&client), date(1, 1, 2020), Revenue::zero());
        let second = Invoice::new(Arc::clone(&client), date(2, 1, 2020), Revenue::zero());
        assert!(Arc::ptr_eq(&first.client_handle(), &second.client_handle()));
        assert!(first.is_for(&Client::with_id("7", "renamed")));
    }
}
