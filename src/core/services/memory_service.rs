//! Vector-backed [`BalanceService`] used by the shell and the tests.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Client, Identifiable, Invoice};
use crate::errors::CollaboratorError;

use super::{BalanceService, ServiceResult};

/// In-memory book of clients and invoices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryBook {
    #[serde(default)]
    clients: Vec<Client>,
    #[serde(default)]
    invoices: Vec<Invoice>,
}

impl InMemoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Loads a book previously written by [`InMemoryBook::save_to_path`].
    pub fn load_from_path(path: &Path) -> ServiceResult<Self> {
        let data = fs::read_to_string(path)?;
        let book: Self = serde_json::from_str(&data)?;
        tracing::info!(
            path = %path.display(),
            clients = book.clients.len(),
            invoices = book.invoices.len(),
            "book loaded"
        );
        Ok(book)
    }

    /// Writes the book to disk atomically by staging to a temporary file.
    pub fn save_to_path(&self, path: &Path) -> ServiceResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp, json)?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    fn known_client(&self, client: &Client) -> ServiceResult<Arc<Client>> {
        self.clients
            .iter()
            .find(|candidate| *candidate == client)
            .map(|found| Arc::new(found.clone()))
            .ok_or_else(|| CollaboratorError::NotFound("client".into()))
    }
}

impl BalanceService for InMemoryBook {
    fn find_all_clients(&self) -> ServiceResult<Vec<Client>> {
        Ok(self.clients.clone())
    }

    fn find_years_of_the_invoices(&self) -> ServiceResult<Vec<i32>> {
        let years: BTreeSet<i32> = self.invoices.iter().map(Invoice::year).collect();
        Ok(years.into_iter().collect())
    }

    fn find_invoices_by_year(&self, year: i32) -> ServiceResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .iter()
            .filter(|invoice| invoice.year() == year)
            .cloned()
            .collect())
    }

    fn find_invoices_by_client_and_year(
        &self,
        client: &Client,
        year: i32,
    ) -> ServiceResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .iter()
            .filter(|invoice| invoice.year() == year && invoice.is_for(client))
            .cloned()
            .collect())
    }

    fn create_client(&mut self, client: Client) -> ServiceResult<Client> {
        if self
            .clients
            .iter()
            .any(|existing| existing.identifier() == client.identifier())
        {
            return Err(CollaboratorError::AlreadyExists("client".into()));
        }
        let stored = match client.id() {
            Some(_) => client,
            None => client.persisted_as(Uuid::new_v4().to_string()),
        };
        tracing::info!(client = %stored, "client created");
        self.clients.push(stored.clone());
        Ok(stored)
    }

    fn delete_client(&mut self, client: &Client) -> ServiceResult<()> {
        let index = self
            .clients
            .iter()
            .position(|existing| existing == client)
            .ok_or_else(|| CollaboratorError::NotFound("client".into()))?;
        let removed = self.clients.remove(index);
        let before = self.invoices.len();
        self.invoices.retain(|invoice| !invoice.is_for(&removed));
        tracing::info!(
            client = %removed,
            invoices = before - self.invoices.len(),
            "client deleted"
        );
        Ok(())
    }

    fn create_invoice(&mut self, invoice: Invoice) -> ServiceResult<Invoice> {
        let client = self.known_client(invoice.client())?;
        let mut stored = Invoice::new(client, invoice.date(), invoice.revenue());
        stored = match invoice.id() {
            Some(id) => stored.with_id(id),
            None => stored.with_id(Uuid::new_v4().to_string()),
        };
        tracing::info!(invoice = %stored, "invoice created");
        self.invoices.push(stored.clone());
        Ok(stored)
    }

    fn delete_invoice(&mut self, invoice: &Invoice) -> ServiceResult<()> {
        let index = self
            .invoices
            .iter()
            .position(|existing| existing == invoice)
            .ok_or_else(|| CollaboratorError::NotFound("invoice".into()))?;
        let removed = self.invoices.remove(index);
        tracing::info!(invoice = %removed, "invoice deleted");
        Ok(())
    }
}
