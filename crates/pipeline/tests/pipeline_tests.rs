//! Integration tests for the fetch → extract → merge pipeline.
//!
//! Documents are served by an in-memory fetcher so ordering and failures
//! can be controlled precisely.

use graphsniper_fetch::{Fetch, FetchError};
use graphsniper_pipeline::{
    AggregateState, Beautify, DirectoryStore, Discard, DocumentProcessor, FinalSchema, MergeOrder,
    Passthrough, Pipeline, PipelineObserver,
};
use graphsniper_types::Endpoint;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct FakeFetcher {
    documents: HashMap<String, (Duration, String)>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeFetcher {
    fn with(mut self, url: &str, delay_ms: u64, body: &str) -> Self {
        self.documents.insert(
            url.to_string(),
            (Duration::from_millis(delay_ms), body.to_string()),
        );
        self
    }
}

#[async_trait::async_trait]
impl Fetch for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let outcome = match self.documents.get(url) {
            Some((delay, body)) => {
                tokio::time::sleep(*delay).await;
                Ok(body.clone())
            }
            None => Err(FetchError::Http(404)),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

fn pipeline(fetcher: Arc<FakeFetcher>) -> Pipeline {
    Pipeline::new(DocumentProcessor::new(
        fetcher,
        Arc::new(Passthrough),
        Arc::new(Discard),
    ))
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_end_to_end_two_documents() {
    let fetcher = FakeFetcher::default()
        .with(
            "https://a.test/one.js",
            0,
            r#"const Q = gql`query GetUser($id: ID!) { user(id: $id) { name } }`; post("/api/graphql");"#,
        )
        .with(
            "https://a.test/two.js",
            0,
            r#"var m="mutation SetUser { ok }"; a("/api/graphql"); b("/api/graphql");"#,
        );
    let state = pipeline(Arc::new(fetcher))
        .run(&urls(&["https://a.test/one.js", "https://a.test/two.js"]))
        .await;

    // Per-document dedup means the second document counts once.
    assert_eq!(state.endpoint_counts()[&Endpoint::from("/api/graphql")], 2);

    let schema = FinalSchema::from_state(&state);
    assert_eq!(schema.endpoint.as_deref(), Some("/api/graphql"));
    assert_eq!(schema.queries.len(), 1);
    assert_eq!(schema.queries["GetUser"].variables, vec!["id"]);
    assert_eq!(schema.mutations.len(), 1);
    assert!(schema.mutations.contains_key("SetUser"));

    let json = serde_json::to_value(&schema).unwrap();
    assert_eq!(json["queries"]["GetUser"]["variables"], serde_json::json!(["id"]));
}

#[tokio::test]
async fn test_failed_fetch_yields_empty_result() {
    let fetcher = FakeFetcher::default().with("https://a.test/ok.js", 0, "query A { a }");
    let state = pipeline(Arc::new(fetcher))
        .run(&urls(&["https://a.test/missing.js", "https://a.test/ok.js"]))
        .await;

    assert_eq!(state.documents_merged(), 2);
    assert_eq!(state.queries().len(), 1);
}

#[tokio::test]
async fn test_empty_url_list() {
    let state = pipeline(Arc::new(FakeFetcher::default())).run(&[]).await;
    assert_eq!(state, AggregateState::new());
}

#[tokio::test]
async fn test_completion_order_decides_winner() {
    // The second URL finishes first, so its body wins.
    let fetcher = FakeFetcher::default()
        .with("https://a.test/slow.js", 200, "mutation Bar { slow }")
        .with("https://a.test/fast.js", 0, "mutation Bar { fast }");
    let state = pipeline(Arc::new(fetcher))
        .run(&urls(&["https://a.test/slow.js", "https://a.test/fast.js"]))
        .await;

    assert_eq!(&*state.mutations()["Bar"].raw_text, "mutation Bar { fast }");
}

#[tokio::test]
async fn test_submission_order_is_reproducible() {
    let fetcher = FakeFetcher::default()
        .with("https://a.test/slow.js", 200, "mutation Bar { slow }")
        .with("https://a.test/fast.js", 0, "mutation Bar { fast }");
    let state = pipeline(Arc::new(fetcher))
        .with_merge_order(MergeOrder::Submission)
        .run(&urls(&["https://a.test/slow.js", "https://a.test/fast.js"]))
        .await;

    assert_eq!(&*state.mutations()["Bar"].raw_text, "mutation Bar { slow }");
}

#[tokio::test]
async fn test_worker_limit_bounds_concurrency() {
    let mut fetcher = FakeFetcher::default();
    let mut list = Vec::new();
    for i in 0..12 {
        let url = format!("https://a.test/{i}.js");
        fetcher = fetcher.with(&url, 20, &format!("query Q{i} {{ a }}"));
        list.push(url);
    }
    let fetcher = Arc::new(fetcher);

    let state = pipeline(Arc::clone(&fetcher))
        .with_workers(3)
        .run(&list)
        .await;

    assert_eq!(state.queries().len(), 12);
    assert!(fetcher.max_in_flight.load(Ordering::SeqCst) <= 3);
}

#[tokio::test]
async fn test_zero_workers_still_runs() {
    let fetcher = FakeFetcher::default().with("https://a.test/a.js", 0, "query A { a }");
    let pipeline = pipeline(Arc::new(fetcher)).with_workers(0);

    assert_eq!(pipeline.workers(), 1);
    assert_eq!(pipeline.run(&urls(&["https://a.test/a.js"])).await.queries().len(), 1);
}

struct Recorder(Vec<(String, usize)>);

impl PipelineObserver for Recorder {
    fn on_merged(&mut self, url: &str, state: &AggregateState) {
        self.0.push((url.to_string(), state.documents_merged()));
    }
}

#[tokio::test]
async fn test_observer_sees_every_merge() {
    let fetcher = FakeFetcher::default()
        .with("https://a.test/a.js", 0, "query A { a }")
        .with("https://a.test/b.js", 0, "query B { b }");
    let mut recorder = Recorder(Vec::new());

    pipeline(Arc::new(fetcher))
        .with_merge_order(MergeOrder::Submission)
        .run_with_observer(
            &urls(&["https://a.test/a.js", "https://a.test/b.js"]),
            &mut recorder,
        )
        .await;

    assert_eq!(
        recorder.0,
        vec![
            ("https://a.test/a.js".to_string(), 1),
            ("https://a.test/b.js".to_string(), 2)
        ]
    );
}

/// Splits single-line bundles at `;`, standing in for a real beautifier.
struct Semicolons;

impl Beautify for Semicolons {
    fn beautify(&self, text: &str) -> Option<String> {
        Some(text.replace(';', ";\n"))
    }
}

#[tokio::test]
async fn test_beautified_text_is_persisted_and_extracted() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path()).unwrap();
    let fetcher = FakeFetcher::default().with(
        "https://a.test/static/main.js?v=1",
        0,
        "a();query A { a };b()",
    );
    let processor = DocumentProcessor::new(Arc::new(fetcher), Arc::new(Semicolons), Arc::new(store));

    let result = processor.process("https://a.test/static/main.js?v=1").await;

    assert!(result.queries.contains_key("A"));
    let saved = std::fs::read_to_string(dir.path().join("main.js")).unwrap();
    assert_eq!(saved, "a();\nquery A { a };\nb()");
}

/// Panics for one URL and serves a query for every other.
struct PanicsOn(&'static str);

#[async_trait::async_trait]
impl Fetch for PanicsOn {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        assert!(url != self.0, "fetcher blew up on {url}");
        Ok("query Survivor { ok }".to_string())
    }
}

async fn run_with_panic(merge_order: MergeOrder) -> AggregateState {
    Pipeline::new(DocumentProcessor::new(
        Arc::new(PanicsOn("https://a.test/boom.js")),
        Arc::new(Passthrough),
        Arc::new(Discard),
    ))
    .with_merge_order(merge_order)
    .run(&urls(&["https://a.test/boom.js", "https://a.test/ok.js"]))
    .await
}

#[tokio::test]
async fn test_panicked_task_counts_as_empty_in_completion_order() {
    let state = run_with_panic(MergeOrder::Completion).await;

    assert_eq!(state.documents_merged(), 2);
    assert_eq!(state.queries().len(), 1);
    assert!(state.queries().contains_key("Survivor"));
}

#[tokio::test]
async fn test_panicked_task_counts_as_empty_in_submission_order() {
    let state = run_with_panic(MergeOrder::Submission).await;

    assert_eq!(state.documents_merged(), 2);
    assert_eq!(state.queries().len(), 1);
    assert!(state.queries().contains_key("Survivor"));
}
