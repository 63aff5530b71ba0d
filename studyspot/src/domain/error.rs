//! Domain error types.
//!
//! Lookup failures in the in-memory tables. Network and decode failures
//! live with their clients.

/// Domain-level errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No library with this id in the curated table
    #[error("library not found: {0}")]
    LibraryNotFound(String),

    /// No station with this id in the directory
    #[error("station not found: {0}")]
    StationNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::LibraryNotFound("nowhere".into());
        assert_eq!(err.to_string(), "library not found: nowhere");

        let err = DomainError::StationNotFound("atlantis".into());
        assert_eq!(err.to_string(), "station not found: atlantis");
    }
}
