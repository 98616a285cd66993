use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    /// No API key was provided. Permanent until the operator sets one.
    #[error("AI Service is not configured. Please set the API_KEY.")]
    NotConfigured,

    /// The call failed, was blocked, or returned nothing usable.
    #[error("{0}")]
    Remote(String),

    /// A structured response did not match the expected schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("could not encode request payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AiError {
    /// Whether re-triggering the same action may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AiError::Remote(_))
    }
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        AiError::Remote(format!("http error: {e}"))
    }
}
