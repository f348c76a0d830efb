use reqwest::StatusCode;
use thiserror::Error;

/// Message shown to the user for every kind of fetch failure.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load players. Please try again later.";

/// Why a player fetch failed. The detail is for logs only; the view collapses
/// every variant into [`LOAD_FAILED_MESSAGE`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a readable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(StatusCode),

    /// Body was not a JSON array of named records.
    #[error("failed to decode players: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}
