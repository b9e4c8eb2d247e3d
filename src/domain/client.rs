use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A customer invoices are issued to.
///
/// Clients are value objects: replacing one means removing it and adding a new
/// one. The `id` is assigned by the owning service and is absent before the
/// client has been persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    identifier: String,
}

impl Client {
    /// Creates a client that has not been persisted yet.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            id: None,
            identifier: identifier.into(),
        }
    }

    /// Creates a client carrying a service-assigned id.
    pub fn with_id(id: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            identifier: identifier.into(),
        }
    }

    /// Returns a copy of this client carrying `id`.
    pub fn persisted_as(&self, id: impl Into<String>) -> Self {
        Self::with_id(id, self.identifier.clone())
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// Two persisted clients are equal when their ids match; otherwise every
/// field has to match.
impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        match (&self.id, &other.id) {
            (Some(left), Some(right)) => left == right,
            _ => self.id == other.id && self.identifier == other.identifier,
        }
    }
}

impl Eq for Client {}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

impl Identifiable for Client {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Displayable for Client {
    fn display_label(&self) -> String {
        self.identifier.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_clients_compare_by_id_only() {
        let first = Client::with_id("1", "test identifier");
        let second = Client::with_id("2", "test identifier");
        let renamed = Client::with_id("1", "renamed");
        assert_ne!(first, second);
        assert_eq!(first, renamed);
    }

    #[test]
    fn unpersisted_clients_compare_all_fields() {
        assert_eq!(Client::new("acme"), Client::new("acme"));
        assert_ne!(Client::new("acme"), Client::new("Acme"));
        assert_ne!(Client::new("acme"), Client::with_id("1", "acme"));
    }

    #[test]
    fn serializes_without_missing_id() {
        let json = serde_json::to_string(&Client::new("acme")).unwrap();
        assert_eq!(json, r#"{"identifier":"acme"}"#);
        let back: Client = serde_json::from_str(&json).unwrap();
        assert!(!back.is_persisted());
    }
}
