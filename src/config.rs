use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use url::Url;

/// How one-shot mode prints the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

/// Baseball players view
#[derive(Parser, Debug, Clone)]
#[command(name = "players-view", version, about)]
pub struct Config {
    /// Base URL of the players API; `/data` is appended
    #[arg(long, env = "API_URL", default_value = "/api")]
    pub api_url: String,

    /// Origin that a relative API base URL is resolved against
    #[arg(long, env = "API_ORIGIN", default_value = "http://localhost:5000")]
    pub origin: String,

    /// Output format for one-shot mode
    #[arg(long, env = "OUTPUT_FORMAT", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Serve the view over HTTP on this address instead of printing it once
    #[arg(long, env = "SERVE_ADDR")]
    pub serve: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.trim().is_empty() {
            anyhow::bail!("api_url must not be empty");
        }
        let origin = Url::parse(&self.origin)
            .with_context(|| format!("origin '{}' is not an absolute URL", self.origin))?;
        if !matches!(origin.scheme(), "http" | "https") {
            anyhow::bail!("origin must use http or https, got '{}'", origin.scheme());
        }
        if let Some(addr) = &self.serve {
            addr.parse::<SocketAddr>()
                .with_context(|| format!("invalid serve address '{}'", addr))?;
        }
        self.endpoint()?;
        Ok(())
    }

    /// Full URL of the players endpoint: `{api_url}/data`, resolved against
    /// `origin` when `api_url` is relative.
    pub fn endpoint(&self) -> anyhow::Result<Url> {
        let origin = Url::parse(&self.origin).context("Failed to parse origin")?;
        let path = format!("{}/data", self.api_url.trim_end_matches('/'));
        origin
            .join(&path)
            .with_context(|| format!("Failed to resolve players endpoint from '{}'", path))
    }

    pub fn serve_addr(&self) -> anyhow::Result<Option<SocketAddr>> {
        self.serve
            .as_deref()
            .map(|a| a.parse().context("Failed to parse serve address"))
            .transpose()
    }
}
