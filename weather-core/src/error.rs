use thiserror::Error;

/// Message shown for every failed fetch, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "City not found or provider error";

/// Anything that stops a fetch from producing a report.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never got a response.
    #[error("Failed to reach weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Weather provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be read as a JSON object.
    #[error("Failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Single user-facing message; the variant is only interesting to logs.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}
