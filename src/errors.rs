use thiserror::Error;

/// A day/month/year triple that does not name a calendar date, or whose year
/// falls outside the accepted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the date {day}/{month}/{year} is not valid")]
pub struct InvalidDateError {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl InvalidDateError {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }
}

/// User-entered amount that cannot be read as a non-negative, two-decimal revenue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a valid amount")]
pub struct RevenueParseError(pub String);

/// Failures reported by the service that owns clients and invoices.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Rejected view operations. The view state is left untouched whenever one
/// of these is returned.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
    #[error("client `{0}` is not in the roster")]
    UnknownClient(String),
    #[error("client `{0}` is already in the roster")]
    DuplicateClient(String),
    #[error("year {0} is not one of the available years")]
    UnknownYear(i32),
    #[error("invoice row {0} does not exist")]
    UnknownInvoice(usize),
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised while loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors that end or prevent a shell session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Service(#[from] CollaboratorError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_date_message_keeps_the_rejected_fields() {
        let err = InvalidDateError::new(31, 2, 2020);
        assert_eq!(err.to_string(), "the date 31/2/2020 is not valid");
    }

    #[test]
    fn view_error_wraps_collaborator_message() {
        let err = ViewError::from(CollaboratorError::AlreadyExists("client".into()));
        assert_eq!(err.to_string(), "client already exists");
    }
}
