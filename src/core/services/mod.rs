//! The collaborator seam: the authoritative owner of clients and invoices.
//!
//! The view never talks to a service directly; the controller answers the
//! view's queued requests through this trait.

pub mod memory_service;

pub use memory_service::InMemoryBook;

use crate::domain::{Client, Invoice};
use crate::errors::CollaboratorError;

pub type ServiceResult<T> = Result<T, CollaboratorError>;

/// Lookup and persistence operations consumed by the controller.
pub trait BalanceService {
    fn find_all_clients(&self) -> ServiceResult<Vec<Client>>;

    /// Years for which at least one invoice exists, in any order.
    fn find_years_of_the_invoices(&self) -> ServiceResult<Vec<i32>>;

    fn find_invoices_by_year(&self, year: i32) -> ServiceResult<Vec<Invoice>>;

    fn find_invoices_by_client_and_year(
        &self,
        client: &Client,
        year: i32,
    ) -> ServiceResult<Vec<Invoice>>;

    /// Persists `client` and returns it with its assigned id.
    fn create_client(&mut self, client: Client) -> ServiceResult<Client>;

    /// Deletes `client` together with all of its invoices.
    fn delete_client(&mut self, client: &Client) -> ServiceResult<()>;

    /// Persists `invoice` and returns it with its assigned id.
    fn create_invoice(&mut self, invoice: Invoice) -> ServiceResult<Invoice>;

    fn delete_invoice(&mut self, invoice: &Invoice) -> ServiceResult<()>;
}
