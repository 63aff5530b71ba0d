//! Station lookup error types.

/// Errors from the station suggestion API and station table loading.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Reading a station table from disk failed
    #[error("I/O error: {message}")]
    Io { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::Api {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: unavailable");

        let err = StationError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }
}
