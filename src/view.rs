use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::models::PlayerRecord;
use crate::source::PlayerSource;

/// What the view is currently showing. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    /// User-facing message; never the technical cause.
    Error(String),
    Loaded(Vec<PlayerRecord>),
}

impl ViewState {
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Error(_) => "error",
            ViewState::Loaded(_) => "loaded",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// The players list view.
///
/// State lives in a `watch` channel so every transition replaces the whole
/// value at once and readers never observe a half-updated view.
pub struct PlayersView {
    source: Arc<dyn PlayerSource>,
    state: watch::Sender<ViewState>,
    mounted: AtomicBool,
}

impl PlayersView {
    pub fn new(source: Arc<dyn PlayerSource>) -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        PlayersView {
            source,
            state,
            mounted: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Run the one and only fetch for this view and settle into `Loaded` or
    /// `Error`. Later calls do nothing.
    pub async fn mount(&self) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            warn!("Players view already mounted; ignoring repeated mount");
            return;
        }

        self.state.send_replace(ViewState::Loading);

        let next = match self.source.fetch_players().await {
            Ok(players) => {
                info!("Players view loaded with {} players", players.len());
                ViewState::Loaded(players)
            }
            Err(e) => {
                error!("Error fetching players: {}", e);
                ViewState::Error(e.user_message().to_string())
            }
        };

        self.state.send_replace(next);
    }

    /// Mount on a background task. The returned handle owns the in-flight
    /// fetch: dropping it tears the view down and discards any response.
    pub fn spawn_mount(self: Arc<Self>) -> MountHandle {
        let task = tokio::spawn(async move { self.mount().await });
        MountHandle { task }
    }
}

/// Owner of a background mount started by [`PlayersView::spawn_mount`].
pub struct MountHandle {
    task: JoinHandle<()>,
}

impl MountHandle {
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the fetch to settle.
    #[cfg(test)]
    pub async fn finished(mut self) {
        if let Err(e) = (&mut self.task).await {
            if !e.is_cancelled() {
                error!("Players view mount task failed: {}", e);
            }
        }
    }

    /// Abort an in-flight fetch. The view stays `Loading`.
    pub fn teardown(self) {}
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("Tearing down players view mid-request; response will be discarded");
        }
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, LOAD_FAILED_MESSAGE};
    use crate::source::{HttpPlayerSource, MockPlayerSource};
    use crate::test_support::spawn_stub;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn mock_returning(
        result: impl Fn() -> Result<Vec<PlayerRecord>, FetchError> + Send + 'static,
    ) -> Arc<dyn PlayerSource> {
        let mut source = MockPlayerSource::new();
        source.expect_fetch_players().times(1).returning(result);
        Arc::new(source)
    }

    /// A stub provider that signals `hit` when the request arrives and holds
    /// the response until `release` is notified.
    async fn gated_view(hit: Arc<Notify>, release: Arc<Notify>) -> Arc<PlayersView> {
        let router = Router::new().route(
            "/api/data",
            get(move || {
                let hit = hit.clone();
                let release = release.clone();
                async move {
                    hit.notify_one();
                    release.notified().await;
                    Json(json!([{"name": "Ruth"}]))
                }
            }),
        );
        let addr = spawn_stub(router).await;
        let endpoint = url::Url::parse(&format!("http://{}/api/data", addr)).unwrap();
        let source = HttpPlayerSource::new(endpoint).unwrap();
        Arc::new(PlayersView::new(Arc::new(source)))
    }

    #[test]
    fn starts_loading() {
        let mut source = MockPlayerSource::new();
        source.expect_fetch_players().never();
        let view = PlayersView::new(Arc::new(source));
        assert_eq!(view.state(), ViewState::Loading);
    }

    #[tokio::test]
    async fn loads_players_in_order() {
        let view = PlayersView::new(mock_returning(|| {
            Ok(vec![PlayerRecord::new("Ruth"), PlayerRecord::new("Gehrig")])
        }));
        view.mount().await;
        assert_eq!(
            view.state(),
            ViewState::Loaded(vec![PlayerRecord::new("Ruth"), PlayerRecord::new("Gehrig")])
        );
    }

    #[tokio::test]
    async fn empty_list_is_loaded_not_error() {
        let view = PlayersView::new(mock_returning(|| Ok(vec![])));
        view.mount().await;
        assert_eq!(view.state(), ViewState::Loaded(vec![]));
    }

    #[tokio::test]
    async fn failure_shows_fixed_message() {
        let view = PlayersView::new(mock_returning(|| {
            Err(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        }));
        view.mount().await;
        assert_eq!(view.state(), ViewState::Error(LOAD_FAILED_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn decode_failure_shows_fixed_message() {
        let view = PlayersView::new(mock_returning(|| {
            Err(FetchError::Decode(
                serde_json::from_str::<Vec<PlayerRecord>>("{").unwrap_err(),
            ))
        }));
        view.mount().await;
        assert_eq!(view.state(), ViewState::Error(LOAD_FAILED_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn second_mount_does_not_refetch() {
        let view = PlayersView::new(mock_returning(|| Ok(vec![PlayerRecord::new("Ruth")])));
        view.mount().await;
        view.mount().await;
        assert_eq!(view.state(), ViewState::Loaded(vec![PlayerRecord::new("Ruth")]));
    }

    #[tokio::test]
    async fn server_error_renders_fixed_message_without_list() {
        let router = Router::new().route(
            "/api/data",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = spawn_stub(router).await;
        let endpoint = url::Url::parse(&format!("http://{}/api/data", addr)).unwrap();
        let view = PlayersView::new(Arc::new(HttpPlayerSource::new(endpoint).unwrap()));

        view.mount().await;

        let text = crate::render::render_text(&view.state());
        assert_eq!(text, "Failed to load players. Please try again later.\n");
        assert!(!text.lines().any(|l| l.starts_with("- ")));
    }

    #[tokio::test]
    async fn loading_until_response_arrives() {
        let hit = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let view = gated_view(hit.clone(), release.clone()).await;
        let mut rx = view.subscribe();

        let handle = Arc::clone(&view).spawn_mount();
        hit.notified().await;
        assert_eq!(view.state(), ViewState::Loading);
        assert!(!handle.is_finished());

        release.notify_one();
        let settled = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| !s.is_loading()))
            .await
            .expect("view never settled")
            .unwrap()
            .clone();
        assert_eq!(settled, ViewState::Loaded(vec![PlayerRecord::new("Ruth")]));
        handle.finished().await;
    }

    #[tokio::test]
    async fn teardown_discards_response() {
        let hit = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let view = gated_view(hit.clone(), release.clone()).await;

        let handle = Arc::clone(&view).spawn_mount();
        hit.notified().await;
        handle.teardown();

        release.notify_one();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(view.state(), ViewState::Loading);
    }

    #[test]
    fn state_serializes_tagged() {
        assert_eq!(
            serde_json::to_value(ViewState::Loading).unwrap(),
            json!({"state": "loading"})
        );
        assert_eq!(
            serde_json::to_value(ViewState::Loaded(vec![PlayerRecord::new("Ruth")])).unwrap(),
            json!({"state": "loaded", "data": [{"name": "Ruth"}]})
        );
        assert_eq!(
            serde_json::to_value(ViewState::Error("x".into())).unwrap(),
            json!({"state": "error", "data": "x"})
        );
    }
}
