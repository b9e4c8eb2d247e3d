use crate::core::ordering::{compare_clients, upper_bound};
use crate::domain::Client;
use crate::errors::{ViewError, ViewResult};

/// Clients ordered by identifier, each present at most once, with an
/// optional selected entry.
#[derive(Debug, Clone, Default)]
pub struct ClientRoster {
    clients: Vec<Client>,
    selected: Option<usize>,
}

impl ClientRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn contains(&self, client: &Client) -> bool {
        self.position(client).is_some()
    }

    pub fn position(&self, client: &Client) -> Option<usize> {
        self.clients.iter().position(|entry| entry == client)
    }

    pub fn selected(&self) -> Option<&Client> {
        self.selected.and_then(|index| self.clients.get(index))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Looks a client up by its display identifier.
    pub fn find_by_identifier(&self, identifier: &str) -> Option<&Client> {
        self.clients
            .iter()
            .find(|client| client.identifier() == identifier)
    }

    /// Replaces the roster with `clients`, each inserted at its sorted
    /// position. Entries equal to an earlier one are skipped; the number of
    /// skipped entries is returned. The selection is cleared.
    pub fn replace_all(&mut self, clients: impl IntoIterator<Item = Client>) -> usize {
        self.clients.clear();
        self.selected = None;
        let mut skipped = 0;
        for client in clients {
            if self.contains(&client) {
                tracing::warn!(client = %client, "duplicate client skipped");
                skipped += 1;
                continue;
            }
            self.insert_sorted(client);
        }
        skipped
    }

    /// Inserts `client` at its sorted position and selects it.
    pub fn add(&mut self, client: Client) -> ViewResult<usize> {
        if self.contains(&client) {
            return Err(ViewError::DuplicateClient(client.identifier().to_string()));
        }
        let index = self.insert_sorted(client);
        self.selected = Some(index);
        Ok(index)
    }

    /// Removes the first entry equal to `client`. The selection is cleared
    /// whether or not anything was removed.
    pub fn remove(&mut self, client: &Client) -> Option<Client> {
        self.selected = None;
        let index = self.position(client)?;
        Some(self.clients.remove(index))
    }

    /// Selects `client`, or clears the selection with `None`.
    pub fn select(&mut self, client: Option<&Client>) -> ViewResult<()> {
        self.selected = match client {
            None => None,
            Some(client) => Some(
                self.position(client)
                    .ok_or_else(|| ViewError::UnknownClient(client.identifier().to_string()))?,
            ),
        };
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn insert_sorted(&mut self, client: Client) -> usize {
        let index = upper_bound(&self.clients, &client, compare_clients);
        self.clients.insert(index, client);
        if let Some(selected) = self.selected.as_mut() {
            if index <= *selected {
                *selected += 1;
            }
        }
        index
    }
}
