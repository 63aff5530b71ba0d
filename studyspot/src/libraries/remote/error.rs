//! Calil client error types.

/// Errors from the Calil library API.
#[derive(Debug, thiserror::Error)]
pub enum CalilError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The body was wrapped in something other than `name(...)`
    #[error("JSONP unwrap error: {message}")]
    Jsonp { message: String },

    /// JSON did not match any known response shape
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client could not be configured
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CalilError {
    /// Coarse failure class for logs: `transport` or `parse`.
    pub fn kind(&self) -> &'static str {
        match self {
            CalilError::Http(_) | CalilError::Api { .. } | CalilError::Config(_) => "transport",
            CalilError::Jsonp { .. } | CalilError::Json { .. } => "parse",
        }
    }
}
