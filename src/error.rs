use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroqError {
    #[error("API key not found. Make sure the GROQ_API_KEY environment variable is set")]
    MissingApiKey,

    #[error("failed to convert request to JSON: {0}")]
    Serialization(String),

    #[error("failed to send request to the API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse API response: {0}")]
    Parse(String),
}

impl GroqError {
    /// Runtime failures that the client absorbs into a fallback answer.
    /// Configuration and serialization errors are returned to the caller instead.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GroqError::Http(_) | GroqError::Status { .. } | GroqError::Parse(_))
    }
}
