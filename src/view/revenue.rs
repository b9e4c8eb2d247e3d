use std::fmt;

use serde::Serialize;

use crate::domain::{Client, Invoice, Revenue};

/// Aggregate of the ledger for one scope, rendered as the revenue label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueSummary {
    pub year: i32,
    pub client: Option<String>,
    pub total: Revenue,
    pub count: usize,
}

impl RevenueSummary {
    pub fn new(year: i32, client: Option<&Client>, invoices: &[Invoice]) -> Self {
        Self {
            year,
            client: client.map(|client| client.identifier().to_string()),
            total: invoices.iter().map(Invoice::revenue).sum(),
            count: invoices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl fmt::Display for RevenueSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.client, self.is_empty()) {
            (None, false) => write!(f, "total revenue for {} is {}", self.year, self.total),
            (Some(client), false) => write!(
                f,
                "total revenue of invoices for client {} in {} is {}",
                client, self.year, self.total
            ),
            (None, true) => write!(f, "no invoices exist for {}", self.year),
            (Some(client), true) => {
                write!(f, "no invoices of {} exist for client {}", self.year, client)
            }
        }
    }
}

/// Label for the ledger under the given scope. Empty without a year.
pub fn revenue_label(year: Option<i32>, client: Option<&Client>, invoices: &[Invoice]) -> String {
    year.map(|year| RevenueSummary::new(year, client, invoices).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn invoice(client: &Client, cents: u64) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2019, 10, 2).unwrap();
        Invoice::new(client.clone(), date, Revenue::from_cents(cents))
    }

    #[test]
    fn year_only_label() {
        let client = Client::new("x");
        let invoices = vec![invoice(&client, 2000), invoice(&client, 1000)];
        assert_eq!(
            revenue_label(Some(2019), None, &invoices),
            "total revenue for 2019 is 30.00"
        );
    }

    #[test]
    fn client_label_keeps_two_decimals() {
        let client = Client::new("x");
        let invoices = vec![invoice(&client, 1020)];
        assert_eq!(
            revenue_label(Some(2019), Some(&client), &invoices),
            "total revenue of invoices for client x in 2019 is 10.20"
        );
    }

    #[test]
    fn empty_labels() {
        let client = Client::new("x");
        assert_eq!(revenue_label(Some(2019), None, &[]), "no invoices exist for 2019");
        assert_eq!(
            revenue_label(Some(2019), Some(&client), &[]),
            "no invoices of 2019 exist for client x"
        );
    }

    #[test]
    fn no_year_means_no_label() {
        assert_eq!(revenue_label(None, None, &[]), "");
    }
}
