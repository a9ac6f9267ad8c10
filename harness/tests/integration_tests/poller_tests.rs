//! Integration tests for polling the query API until a trace appears.
//!
//! Tests cover:
//! - A trace that becomes visible after one empty response
//! - A `data: null` error body treated as "not indexed yet"
//! - Fetch errors ending the poll without further requests
//! - Short custom schedules running out

use harness::poller::poll_for_trace_with_schedule;
use harness::{poll_for_trace, Error};
use std::time::{Duration, Instant};

use super::common::{init_logging, FakeBackend, EMPTY_BODY, HELLO_TRACE_BODY, NULL_DATA_BODY};

#[tokio::test]
async fn test_poll_waits_for_trace_to_be_indexed() {
    init_logging();
    let backend = FakeBackend::spawn(&[EMPTY_BODY, HELLO_TRACE_BODY]).await;
    let client = backend.client("python.traces.sampling");
    let start = Instant::now();

    let trace = poll_for_trace(&client).await.unwrap();

    assert_eq!(trace.trace_id, "abc");
    assert_eq!(backend.trace_requests(), 2);
    // One 1s backoff between the two fetches, and no second sleep.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(1), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_poll_retries_after_null_data() {
    let backend = FakeBackend::spawn(&[NULL_DATA_BODY, HELLO_TRACE_BODY]).await;
    let client = backend.client("python.traces.sampling");
    let start = Instant::now();

    let trace = poll_for_trace(&client).await.unwrap();

    assert_eq!(trace.trace_id, "abc");
    assert_eq!(backend.trace_requests(), 2);
    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_poll_returns_immediately_when_trace_exists() {
    let backend = FakeBackend::spawn(&[HELLO_TRACE_BODY]).await;
    let client = backend.client("svc");
    let start = Instant::now();

    poll_for_trace(&client).await.unwrap();

    assert_eq!(backend.trace_requests(), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_poll_stops_on_decode_error() {
    let backend = FakeBackend::spawn(&["not json", HELLO_TRACE_BODY]).await;
    let client = backend.client("svc");

    let err = poll_for_trace(&client).await.unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
    assert_eq!(backend.trace_requests(), 1);
}

#[tokio::test]
async fn test_poll_custom_schedule_exhausted() {
    let backend = FakeBackend::spawn(&[]).await;
    let client = backend.client("python.traces.sampling");
    let schedule = [Duration::from_millis(10), Duration::from_millis(20)];

    let err = poll_for_trace_with_schedule(&client, &schedule)
        .await
        .unwrap_err();

    assert_eq!(backend.trace_requests(), 2);
    assert_eq!(
        err.to_string(),
        "No trace found for service 'python.traces.sampling' after 2 attempt(s)"
    );
}
