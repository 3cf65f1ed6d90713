use thiserror::Error;

use super::resource::RecordId;
use super::validation::ValidationErrors;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: RecordId },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    #[must_use]
    pub fn not_found(kind: &'static str, id: RecordId) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = DomainError::not_found("Bridge", 99999);
        assert_eq!(err.to_string(), "Bridge with id 99999 not found");
    }
}
