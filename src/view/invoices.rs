use crate::core::ordering::{compare_invoices, upper_bound};
use crate::domain::{Client, Invoice, Revenue};
use crate::errors::{ViewError, ViewResult};

/// Invoices of the active scope, oldest first, with the row currently
/// selected by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct InvoiceLedger {
    invoices: Vec<Invoice>,
    selected: Option<usize>,
}

impl InvoiceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Invoice> {
        self.invoices.get(row)
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Invoice> {
        self.selected.and_then(|row| self.invoices.get(row))
    }

    pub fn total(&self) -> Revenue {
        self.invoices.iter().map(Invoice::revenue).sum()
    }

    /// Replaces the contents, sorted by date and stable on ties. Clears the
    /// row selection.
    pub fn replace_all(&mut self, invoices: impl IntoIterator<Item = Invoice>) {
        self.invoices = invoices.into_iter().collect();
        self.invoices.sort_by(compare_invoices);
        self.selected = None;
    }

    /// Inserts after every invoice dated on or before `invoice`. A selected
    /// row at or after the insertion point moves down by one.
    pub fn insert(&mut self, invoice: Invoice) -> usize {
        let row = upper_bound(&self.invoices, &invoice, compare_invoices);
        self.invoices.insert(row, invoice);
        if let Some(selected) = self.selected.as_mut() {
            if row <= *selected {
                *selected += 1;
            }
        }
        row
    }

    /// Removes the first invoice equal to `invoice`.
    pub fn remove(&mut self, invoice: &Invoice) -> Option<Invoice> {
        let row = self.invoices.iter().position(|entry| entry == invoice)?;
        self.selected = match self.selected {
            Some(selected) if selected == row => None,
            Some(selected) if selected > row => Some(selected - 1),
            other => other,
        };
        Some(self.invoices.remove(row))
    }

    /// Removes every invoice of `client`, returning how many were dropped.
    pub fn remove_of_client(&mut self, client: &Client) -> usize {
        let before = self.invoices.len();
        let selected = self.selected;
        let mut row = 0;
        let mut shift = 0;
        let mut selection_survives = true;
        self.invoices.retain(|invoice| {
            let keep = !invoice.is_for(client);
            match selected {
                Some(sel) if !keep && row < sel => shift += 1,
                Some(sel) if !keep && row == sel => selection_survives = false,
                _ => {}
            }
            row += 1;
            keep
        });
        self.selected = match selected {
            Some(sel) if selection_survives => Some(sel - shift),
            _ => None,
        };
        before - self.invoices.len()
    }

    pub fn select(&mut self, row: Option<usize>) -> ViewResult<()> {
        if let Some(row) = row {
            if row >= self.invoices.len() {
                return Err(ViewError::UnknownInvoice(row));
            }
        }
        self.selected = row;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn invoice(client: &str, day: u32, cents: u64) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2019, 10, day).unwrap();
        Invoice::new(Client::new(client), date, Revenue::from_cents(cents))
    }

    fn days(ledger: &InvoiceLedger) -> Vec<String> {
        ledger.invoices().iter().map(Invoice::date_label).collect()
    }

    #[test]
    fn replace_all_sorts_by_date_and_keeps_ties_in_input_order() {
        let mut ledger = InvoiceLedger::new();
        ledger.replace_all(vec![
            invoice("a", 4, 1),
            invoice("b", 2, 2),
            invoice("c", 4, 3),
            invoice("d", 2, 4),
        ]);
        let clients: Vec<&str> = ledger
            .invoices()
            .iter()
            .map(|invoice| invoice.client().identifier())
            .collect();
        assert_eq!(clients, ["b", "d", "a", "c"]);
    }

    #[test]
    fn insert_shifts_the_selected_row() {
        let mut ledger = InvoiceLedger::new();
        ledger.replace_all(vec![invoice("a", 2, 20), invoice("a", 4, 10)]);
        ledger.select(Some(1)).unwrap();

        let row = ledger.insert(invoice("a", 3, 10));

        assert_eq!(row, 1);
        assert_eq!(days(&ledger), ["02/10/2019", "03/10/2019", "04/10/2019"]);
        assert_eq!(ledger.selected_row(), Some(2));
    }

    #[test]
    fn insert_after_selection_keeps_it() {
        let mut ledger = InvoiceLedger::new();
        ledger.replace_all(vec![invoice("a", 2, 20)]);
        ledger.select(Some(0)).unwrap();
        ledger.insert(invoice("a", 2, 5));
        assert_eq!(ledger.selected_row(), Some(0));
        assert_eq!(ledger.invoices()[1], invoice("a", 2, 5));
    }

    #[test]
    fn remove_adjusts_selection() {
        let mut ledger = InvoiceLedger::new();
        ledger.replace_all(vec![invoice("a", 1, 1), invoice("a", 2, 2), invoice("a", 3, 3)]);
        ledger.select(Some(2)).unwrap();
        assert!(ledger.remove(&invoice("a", 1, 1)).is_some());
        assert_eq!(ledger.selected_row(), Some(1));
        assert!(ledger.remove(&invoice("a", 3, 3)).is_some());
        assert_eq!(ledger.selected_row(), None);
        assert!(ledger.remove(&invoice("z", 9, 9)).is_none());
    }

    #[test]
    fn remove_of_client_drops_every_matching_row() {
        let mut ledger = InvoiceLedger::new();
        ledger.replace_all(vec![invoice("a", 1, 1), invoice("b", 2, 2), invoice("a", 3, 3)]);
        ledger.select(Some(1)).unwrap();
        assert_eq!(ledger.remove_of_client(&Client::new("a")), 2);
        assert_eq!(ledger.invoices(), [invoice("b", 2, 2)]);
        assert_eq!(ledger.selected_row(), Some(0));
        assert_eq!(ledger.total(), Revenue::from_cents(2));
    }

    #[test]
    fn select_rejects_rows_past_the_end() {
        let mut ledger = InvoiceLedger::new();
        assert!(matches!(ledger.select(Some(0)), Err(ViewError::UnknownInvoice(0))));
        assert!(ledger.select(None).is_ok());
    }
}
