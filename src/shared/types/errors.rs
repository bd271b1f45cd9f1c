use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller-supplied data violates a precondition. Raised before any store call.
    #[error("{operation}: invalid input: {reason}")]
    InvalidInput {
        operation: &'static str,
        reason: String,
    },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// The store collaborator reported an error.
    #[error("{operation}: storage failure: {cause}")]
    StorageFailure {
        operation: &'static str,
        cause: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{operation} is not permitted in guest mode")]
    Forbidden { operation: &'static str },
}

impl DomainError {
    pub fn invalid_input(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            operation,
            reason: reason.into(),
        }
    }

    pub fn storage(operation: &'static str, cause: impl ToString) -> Self {
        Self::StorageFailure {
            operation,
            cause: cause.to_string(),
        }
    }

    /// Name of the operation that failed, when the error carries one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { operation, .. }
            | Self::StorageFailure { operation, .. }
            | Self::Forbidden { operation } => Some(operation),
            Self::NotFound { .. } | Self::Unauthorized(_) => None,
        }
    }

    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::StorageFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failure_carries_operation_and_cause() {
        let err = DomainError::storage("insert", "disk I/O error");
        assert_eq!(err.operation(), Some("insert"));
        assert!(err.is_storage_failure());
        assert_eq!(err.to_string(), "insert: storage failure: disk I/O error");
    }

    #[test]
    fn not_found_has_no_operation() {
        let err = DomainError::NotFound {
            entity: "Station",
            field: "id",
            value: "7".into(),
        };
        assert_eq!(err.operation(), None);
        assert_eq!(err.to_string(), "Not found: Station with id=7");
    }
}
