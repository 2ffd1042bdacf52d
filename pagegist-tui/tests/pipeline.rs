mod common;

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use pagegist_http::HttpClient;
use pagegist_llm::{Message, Role, SYSTEM_PROMPT, SummaryClient, SummaryError};
use pagegist_tui::{Pipeline, PipelineError};
use pagegist_web::FetchError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str =
    "<html><title>Example</title><body><h1>Hi</h1><script>bad()</script></body></html>";

/// Counts calls and records the messages it was handed.
struct RecordingClient {
    calls: AtomicUsize,
    seen: Mutex<Vec<Message>>,
}

impl RecordingClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SummaryClient for RecordingClient {
    async fn summarize(&self, messages: &[Message]) -> Result<String, SummaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().extend_from_slice(messages);
        Ok("**Example** says Hi.".to_string())
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

struct FailingClient;

#[async_trait]
impl SummaryClient for FailingClient {
    async fn summarize(&self, _messages: &[Message]) -> Result<String, SummaryError> {
        Err(SummaryError::Api("Provider returned error".to_string()))
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

fn pipeline_against(base: &str, client: Arc<dyn SummaryClient>) -> Pipeline {
    Pipeline::new(HttpClient::new(base).unwrap(), client)
}

#[tokio::test]
async fn summarizes_a_served_page() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"))
        .mount(&server)
        .await;

    let fake = RecordingClient::new();
    let pipeline = pipeline_against(&server.uri(), fake.clone());

    let url = format!("{}/", server.uri());
    let summary = pipeline.summarize_url(&url).await.unwrap();

    assert_eq!(summary, "**Example** says Hi.");
    assert_eq!(fake.calls.load(Ordering::SeqCst), 1);

    let seen = fake.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].role, Role::System);
    assert_eq!(seen[0].content, SYSTEM_PROMPT);
    assert_eq!(seen[1].role, Role::User);
    assert!(seen[1].content.contains("Example"));
    assert!(seen[1].content.contains("Hi"));
    assert!(!seen[1].content.contains("bad()"));
}

#[tokio::test]
async fn unreachable_host_skips_the_model() {
    common::init_test_tracing();
    let fake = RecordingClient::new();
    let pipeline = pipeline_against("http://127.0.0.1:1/", fake.clone());

    let err = pipeline
        .summarize_url("http://127.0.0.1:1/")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Fetch(FetchError::Network { .. })
    ));
    assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_url_fails_before_any_io() {
    common::init_test_tracing();
    let fake = RecordingClient::new();
    let pipeline = pipeline_against("http://127.0.0.1:1/", fake.clone());

    let err = pipeline.summarize_url("not a url").await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Fetch(FetchError::InvalidUrl { .. })
    ));
    assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn http_error_status_skips_the_model() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let fake = RecordingClient::new();
    let pipeline = pipeline_against(&server.uri(), fake.clone());

    let url = format!("{}/gone", server.uri());
    let err = pipeline.summarize_url(&url).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Fetch(FetchError::Status { .. })
    ));
    assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn model_failure_surfaces_as_summary_error() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"))
        .mount(&server)
        .await;

    let pipeline = pipeline_against(&server.uri(), Arc::new(FailingClient));

    let url = format!("{}/", server.uri());
    let err = pipeline.summarize_url(&url).await.unwrap_err();

    match err {
        PipelineError::Summary(SummaryError::Api(msg)) => {
            assert!(msg.contains("Provider returned error"));
        }
        other => panic!("expected Summary error, got {other:?}"),
    }
}
