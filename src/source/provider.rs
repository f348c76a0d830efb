use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::PlayerRecord;

/// Anything the view can load players from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Fetch the full player list. Called at most once per view.
    async fn fetch_players(&self) -> Result<Vec<PlayerRecord>, FetchError>;
}
