//! Integration tests for the end-to-end scenarios.
//!
//! Tests cover:
//! - A trace emitted by the sample on its own
//! - Triggering a trace through the sample API and waiting for it
//! - Failures before any trace is fetched
//! - Expectation failures being reported apart from transport failures

use harness::models::Tag;
use harness::scenario::{run_api_scenario, run_sample_scenario, EXPECTED_SPAN_NAME};
use harness::{Config, Endpoints, Error, ExpectationError, TraceClient};
use serde_json::json;

use super::common::{init_logging, unused_addr, FakeBackend, EMPTY_BODY, HELLO_TRACE_BODY};

fn api_trace_body() -> String {
    json!({
        "data": [{
            "traceID": "7f3a",
            "spans": [
                {
                    "traceID": "7f3a",
                    "spanID": "server",
                    "operationName": "GET /helloworld",
                    "tags": [{"key": "http.status_code", "value": 200}]
                },
                {
                    "traceID": "7f3a",
                    "spanID": "hello",
                    "operationName": "HelloWorldSpan",
                    "tags": [
                        {"key": "otel.library.name", "value": "sample"},
                        {"key": "foo", "value": "bar"}
                    ]
                }
            ]
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_sample_scenario_passes() {
    init_logging();
    let backend = FakeBackend::spawn(&[HELLO_TRACE_BODY]).await;

    let trace = run_sample_scenario(&backend.client("go.traces")).await.unwrap();

    assert_eq!(trace.trace_id, "abc");
    assert_eq!(trace.span_count(), 1);
    let span = &trace.spans[0];
    assert_eq!(span.operation_name, EXPECTED_SPAN_NAME);
    assert!(span.tags.contains(&Tag::new("foo", "bar")));
    assert_eq!(backend.helloworld_calls(), 0);
}

#[tokio::test]
async fn test_sample_scenario_without_trace_fails_after_one_fetch() {
    let backend = FakeBackend::spawn(&[EMPTY_BODY]).await;

    let err = run_sample_scenario(&backend.client("go.traces"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TraceNotFound { attempts: 1, .. }));
    assert_eq!(backend.trace_requests(), 1);
}

#[tokio::test]
async fn test_sample_scenario_two_spans_is_expectation_failure() {
    let body = api_trace_body();
    let backend = FakeBackend::spawn(&[body.as_str()]).await;

    let err = run_sample_scenario(&backend.client("svc"))
        .await
        .unwrap_err();

    assert!(err.is_expectation());
    assert!(matches!(
        err,
        Error::Expectation(ExpectationError::SpanCount {
            expected: 1,
            actual: 2,
            ..
        })
    ));
}

#[tokio::test]
async fn test_api_scenario_passes_after_retry() {
    init_logging();
    let body = api_trace_body();
    let backend = FakeBackend::spawn(&[EMPTY_BODY, body.as_str()]).await;

    let trace = run_api_scenario(&backend.client("python.traces.api"))
        .await
        .unwrap();

    assert_eq!(trace.trace_id, "7f3a");
    let span = trace.find_span(EXPECTED_SPAN_NAME).unwrap();
    assert!(span.has_tag(&Tag::new("foo", "bar")));
    assert_eq!(backend.helloworld_calls(), 1);
    assert_eq!(backend.trace_requests(), 2);
}

#[tokio::test]
async fn test_api_scenario_missing_tag_is_expectation_failure() {
    let body = r#"{"data":[{"traceID":"t","spans":[{"operationName":"HelloWorldSpan","tags":[{"key":"foo","value":"baz"}]}]}]}"#;
    let backend = FakeBackend::spawn(&[body]).await;

    let err = run_api_scenario(&backend.client("svc")).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Span 'HelloWorldSpan' does not contain tag 'foo:bar'"
    );
    assert!(err.is_expectation());
}

#[tokio::test]
async fn test_api_scenario_sample_unreachable_skips_fetch() {
    let backend = FakeBackend::spawn(&[HELLO_TRACE_BODY]).await;
    let sample_url = format!("http://{}", unused_addr());
    let client = TraceClient::with_endpoints(
        &Config::new("svc").unwrap(),
        Endpoints::new(backend.url(), sample_url.clone()),
    );

    let err = run_api_scenario(&client).await.unwrap_err();

    match &err {
        Error::Transport { endpoint, .. } => {
            assert_eq!(endpoint, &format!("{sample_url}/helloworld"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(!err.is_expectation());
    assert_eq!(backend.trace_requests(), 0);
}
