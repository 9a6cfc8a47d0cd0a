//! Search controller
//!
//! Drives one search cycle: validate input, show the loading state, ask the
//! provider, render the outcome. Every failure ends as a displayed message.
//!
//! Overlapping searches are allowed. Each search takes a generation number
//! when it starts and its outcome is only rendered if no newer search has
//! started since, so a slow stale response never overwrites a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::SearchError;
use crate::providers::ImageProvider;
use crate::render::{render_state, Renderer};
use crate::types::{DisplayState, Query};

pub struct SearchController {
    provider: Arc<dyn ImageProvider>,
    renderer: Arc<dyn Renderer>,
    generation: AtomicU64,
    state: Mutex<DisplayState>,
}

impl SearchController {
    /// Create a controller and render the idle prompt
    pub fn new(provider: Arc<dyn ImageProvider>, renderer: Arc<dyn Renderer>) -> Self {
        render_state(renderer.as_ref(), &DisplayState::Idle);
        Self {
            provider,
            renderer,
            generation: AtomicU64::new(0),
            state: Mutex::new(DisplayState::Idle),
        }
    }

    pub fn provider(&self) -> &dyn ImageProvider {
        self.provider.as_ref()
    }

    /// The state currently shown in the output region
    pub fn state(&self) -> DisplayState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Handle a search trigger with raw user input
    ///
    /// Empty input is rejected without touching the network. Returns the
    /// outcome of this particular search.
    pub async fn submit_search(&self, raw_input: &str) -> DisplayState {
        match Query::parse(raw_input) {
            Ok(query) => self.fetch_images(query).await,
            Err(err) => {
                tracing::info!("Rejected empty query");
                let generation = self.next_generation();
                let outcome = DisplayState::from_error(&err);
                self.publish(generation, outcome.clone());
                outcome
            }
        }
    }

    /// Run one search against the provider and render its outcome
    pub async fn fetch_images(&self, query: Query) -> DisplayState {
        let generation = self.next_generation();
        self.publish(generation, DisplayState::Loading);

        tracing::info!(
            provider = self.provider.name(),
            generation,
            "Searching images for: {}",
            query
        );

        let outcome = match self.provider.search(&query).await {
            Ok(results) => {
                tracing::info!(generation, "Found {} images", results.len());
                DisplayState::Results(results)
            }
            Err(err) => {
                log_failure(&err);
                DisplayState::from_error(&err)
            }
        };

        self.publish(generation, outcome.clone());
        outcome
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Render `next` if `generation` is still the latest issued
    fn publish(&self, generation: u64, next: DisplayState) -> bool {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            tracing::debug!(generation, latest, "Discarding stale search outcome");
            return false;
        }

        render_state(self.renderer.as_ref(), &next);
        *state = next;
        true
    }
}

fn log_failure(err: &SearchError) {
    match err {
        SearchError::ParseOrEmpty { .. } => tracing::info!("{}", err),
        _ => tracing::error!("Search failed: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HtmlRenderer;
    use crate::types::{CaptionKind, ImageResult};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;
    use url::Url;

    fn image(name: &str) -> ImageResult {
        ImageResult {
            image_url: format!("{}.jpg", name),
            caption: String::new(),
            caption_kind: CaptionKind::Tags,
            photographer_name: name.to_string(),
            photographer_link: None,
            likes: None,
            downloads: None,
        }
    }

    /// Answers every query with a canned outcome and counts calls
    struct StubProvider {
        calls: AtomicUsize,
        respond: Box<dyn Fn(&Query) -> Result<Vec<ImageResult>, SearchError> + Send + Sync>,
    }

    impl StubProvider {
        fn new<F>(respond: F) -> Arc<Self>
        where
            F: Fn(&Query) -> Result<Vec<ImageResult>, SearchError> + Send + Sync + 'static,
        {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                respond: Box::new(respond),
            })
        }
    }

    #[async_trait]
    impl ImageProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn request_url(&self, _query: &Query) -> Result<Url, SearchError> {
            Ok(Url::parse("http://stub.invalid/").unwrap())
        }

        fn parse_results(&self, _body: &str) -> Option<Vec<ImageResult>> {
            None
        }

        async fn search(&self, query: &Query) -> Result<Vec<ImageResult>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.respond)(query)
        }
    }

    fn setup(provider: Arc<dyn ImageProvider>) -> (SearchController, Arc<HtmlRenderer>) {
        let renderer = Arc::new(HtmlRenderer::new());
        let controller = SearchController::new(provider, renderer.clone());
        (controller, renderer)
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let (controller, renderer) = setup(StubProvider::new(|_| Ok(vec![])));
        assert_eq!(controller.state(), DisplayState::Idle);
        assert!(renderer.contents().contains(DisplayState::IDLE_MESSAGE));
    }

    #[tokio::test]
    async fn test_whitespace_query_makes_no_call() {
        let provider = StubProvider::new(|_| Ok(vec![image("x")]));
        let (controller, renderer) = setup(provider.clone());

        let outcome = controller.submit_search("   ").await;

        assert_eq!(
            outcome,
            DisplayState::Error("Please enter a keyword to search for images.".to_string())
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(renderer.contents().contains("error-message"));
    }

    #[tokio::test]
    async fn test_results_rendered_in_order() {
        let provider = StubProvider::new(|_| Ok(vec![image("a"), image("b"), image("c")]));
        let (controller, renderer) = setup(provider.clone());

        let outcome = controller.submit_search("  cats ").await;

        match &outcome {
            DisplayState::Results(results) => {
                let names: Vec<&str> =
                    results.iter().map(|r| r.photographer_name.as_str()).collect();
                assert_eq!(names, vec!["a", "b", "c"]);
            }
            other => panic!("expected results, got {:?}", other),
        }
        assert_eq!(controller.state(), outcome);
        assert_eq!(renderer.contents().matches("class=\"image-card\"").count(), 3);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provider_receives_trimmed_query() {
        let provider = StubProvider::new(|q| {
            assert_eq!(q.as_str(), "red fox");
            Ok(vec![image("fox")])
        });
        let (controller, _) = setup(provider);
        controller.submit_search("\tred fox  ").await;
    }

    #[tokio::test]
    async fn test_errors_become_messages() {
        let cases: Vec<(fn() -> SearchError, &str)> = vec![
            (|| SearchError::Http { status: 403 }, "Status: 403"),
            (
                || SearchError::ParseOrEmpty {
                    query: "cats".to_string(),
                },
                "No images found for \"cats\"",
            ),
            (
                || SearchError::NetworkOrUnknown("connection refused".to_string()),
                "Failed to fetch image data",
            ),
        ];

        for (make_err, expected) in cases {
            let provider = StubProvider::new(move |_| Err(make_err()));
            let (controller, renderer) = setup(provider);

            let outcome = controller.submit_search("cats").await;

            match &outcome {
                DisplayState::Error(text) => assert!(text.contains(expected), "{}", text),
                other => panic!("expected error, got {:?}", other),
            }
            assert!(!controller.state().is_loading());
            assert!(!renderer.contents().contains("image-card"));
        }
    }

    /// Blocks the first search until released, answers later ones at once
    struct GatedProvider {
        gate: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageProvider for GatedProvider {
        fn name(&self) -> &str {
            "gated"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn request_url(&self, _query: &Query) -> Result<Url, SearchError> {
            Ok(Url::parse("http://gated.invalid/").unwrap())
        }

        fn parse_results(&self, _body: &str) -> Option<Vec<ImageResult>> {
            None
        }

        async fn search(&self, query: &Query) -> Result<Vec<ImageResult>, SearchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.gate.notified().await;
            }
            Ok(vec![image(query.as_str())])
        }
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let renderer = Arc::new(HtmlRenderer::new());
        let controller = Arc::new(SearchController::new(provider.clone(), renderer.clone()));

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit_search("old").await })
        };

        // Wait until the slow search is parked inside the provider
        while provider.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let fresh = controller.submit_search("new").await;
        assert!(renderer.contents().contains("new.jpg"));

        provider.gate.notify_one();
        let stale = slow.await.unwrap();

        // The slow search still reports its own outcome...
        assert!(matches!(stale, DisplayState::Results(ref r) if r[0].image_url == "old.jpg"));
        // ...but the view keeps the fresher one
        assert_eq!(controller.state(), fresh);
        assert!(renderer.contents().contains("new.jpg"));
        assert!(!renderer.contents().contains("old.jpg"));
    }

    #[tokio::test]
    async fn test_empty_query_supersedes_in_flight_search() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let renderer = Arc::new(HtmlRenderer::new());
        let controller = Arc::new(SearchController::new(provider.clone(), renderer.clone()));

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit_search("old").await })
        };
        while provider.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        controller.submit_search("").await;
        provider.gate.notify_one();
        slow.await.unwrap();

        assert!(matches!(controller.state(), DisplayState::Error(_)));
        assert!(!renderer.contents().contains("old.jpg"));
    }
}
