use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod dashboard;
mod error;
mod models;
mod render;
mod source;
mod view;

#[cfg(test)]
mod test_support;

use config::{Config, OutputFormat};
use dashboard::AppState;
use source::HttpPlayerSource;
use view::{PlayersView, ViewState};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the rendered view
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let source = HttpPlayerSource::from_config(&config)?;
    info!("Players endpoint: {}", source.endpoint());
    let view = Arc::new(PlayersView::new(Arc::new(source)));

    match config.serve_addr()? {
        Some(addr) => {
            let app = dashboard::router(AppState {
                view: view.subscribe(),
            });
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Serving players view on http://{}", addr);

            let mount = Arc::clone(&view).spawn_mount();
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            info!("Players view shutting down");
            mount.teardown();
        }
        None => {
            view.mount().await;
            print!("{}", render_once(&view.state(), config.format));
        }
    }

    Ok(())
}

/// One-shot output: the settled view in the requested format, newline-terminated.
fn render_once(state: &ViewState, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render::render_text(state),
        OutputFormat::Html => render::render_html(state) + "\n",
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, serving until killed: {}", e);
        std::future::pending::<()>().await;
    }
}
