/// Entities that may carry an identifier assigned by the owning service.
pub trait Identifiable {
    /// `None` until the entity has been persisted.
    fn id(&self) -> Option<&str>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Supplies a presentation-ready label for UI, error messages or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
