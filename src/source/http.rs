use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::provider::PlayerSource;
use crate::config::Config;
use crate::error::FetchError;
use crate::models::PlayerRecord;

/// Player source backed by `GET {api_url}/data`.
///
/// No timeout is set on the client: the request either resolves or is
/// dropped along with the view that started it.
#[derive(Clone)]
pub struct HttpPlayerSource {
    http: Client,
    endpoint: Url,
}

impl HttpPlayerSource {
    pub fn new(endpoint: Url) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpPlayerSource { http, endpoint })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.endpoint()?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PlayerSource for HttpPlayerSource {
    async fn fetch_players(&self) -> Result<Vec<PlayerRecord>, FetchError> {
        info!("Fetching players from {}", self.endpoint);

        let resp = self.http.get(self.endpoint.clone()).send().await?;
        let status = resp.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // Bad JSON must map to Decode, not Transport
        let body = resp.bytes().await?;
        let players: Vec<PlayerRecord> = serde_json::from_slice(&body)?;
        info!("Received {} players", players.len());
        Ok(players)
    }
}
