//! The two end-to-end scenarios and the checks they make.
//!
//! 1. The sample app emitted a trace on its own: fetch it once and check it
//!    consists of exactly the expected span.
//! 2. Call the sample API to generate a span, wait for the backend to index
//!    it, then check the expected span is somewhere in the trace.

use crate::client::TraceClient;
use crate::error::{ExpectationError, Result};
use crate::models::{Span, Tag, Trace};
use crate::poller::poll_for_trace;

/// Operation name of the span the sample app emits.
pub const EXPECTED_SPAN_NAME: &str = "HelloWorldSpan";

/// Key of the tag the sample app attaches to its span.
pub const EXPECTED_TAG_KEY: &str = "foo";

/// Value of the tag the sample app attaches to its span.
pub const EXPECTED_TAG_VALUE: &str = "bar";

/// Body returned by the sample app's hello world endpoint.
pub const EXPECTED_GREETING: &str = "Hello world!";

/// The tag every checked span must carry.
#[must_use]
pub fn expected_tag() -> Tag {
    Tag::new(EXPECTED_TAG_KEY, EXPECTED_TAG_VALUE)
}

fn check_tag(span: &Span, tag: &Tag) -> std::result::Result<(), ExpectationError> {
    if !span.has_tag(tag) {
        return Err(ExpectationError::MissingTag {
            operation_name: span.operation_name.clone(),
            tag: tag.to_string(),
        });
    }
    Ok(())
}

/// Checks a trace emitted by the sample app without an API call.
///
/// The trace must pass [`Trace::validate_trace`] and have exactly one span,
/// named [`EXPECTED_SPAN_NAME`] and carrying the `foo:bar` tag.
///
/// # Errors
///
/// Returns the first [`ExpectationError`] found.
pub fn check_sample_trace(trace: &Trace) -> std::result::Result<(), ExpectationError> {
    trace.validate_trace()?;

    if trace.span_count() != 1 {
        return Err(ExpectationError::SpanCount {
            trace_id: trace.trace_id.clone(),
            expected: 1,
            actual: trace.span_count(),
        });
    }

    let span = &trace.spans[0];
    if span.operation_name != EXPECTED_SPAN_NAME {
        return Err(ExpectationError::OperationName {
            expected: EXPECTED_SPAN_NAME.to_string(),
            actual: span.operation_name.clone(),
        });
    }

    check_tag(span, &expected_tag())
}

/// Checks the sample API response and the trace it generated.
///
/// The response must be [`EXPECTED_GREETING`]. The trace may hold other
/// spans (the HTTP server span, for instance), including several named
/// [`EXPECTED_SPAN_NAME`]; at least one span, at any position, must have
/// that name and carry the `foo:bar` tag.
///
/// # Errors
///
/// Returns the first [`ExpectationError`] found.
pub fn check_api_trace(response: &str, trace: &Trace) -> std::result::Result<(), ExpectationError> {
    if response != EXPECTED_GREETING {
        return Err(ExpectationError::UnexpectedResponse {
            expected: EXPECTED_GREETING.to_string(),
            actual: response.to_string(),
        });
    }

    trace.validate_trace()?;

    let tag = expected_tag();
    if trace.find_tagged_span(EXPECTED_SPAN_NAME, &tag).is_some() {
        return Ok(());
    }

    match trace.find_span(EXPECTED_SPAN_NAME) {
        Some(span) => check_tag(span, &tag),
        None => Err(ExpectationError::SpanNotFound {
            trace_id: trace.trace_id.clone(),
            operation_name: EXPECTED_SPAN_NAME.to_string(),
        }),
    }
}

/// Fetches the sample's trace once and checks it.
///
/// # Errors
///
/// Returns [`crate::Error::TraceNotFound`] with one attempt if the backend has
/// no trace, any fetch error, or an expectation failure.
pub async fn run_sample_scenario(client: &TraceClient) -> Result<Trace> {
    let trace = client
        .fetch_trace()
        .await?
        .ok_or_else(|| crate::Error::TraceNotFound {
            service: client.service().to_string(),
            attempts: 1,
        })?;

    check_sample_trace(&trace)?;
    tracing::info!(trace_id = %trace.trace_id, "Sample trace verified");
    Ok(trace)
}

/// Calls the sample API, waits for the resulting trace and checks both.
///
/// If the sample API cannot be reached, no trace fetch is attempted.
///
/// # Errors
///
/// Returns transport, decode, poll exhaustion or expectation errors.
pub async fn run_api_scenario(client: &TraceClient) -> Result<Trace> {
    let response = client.invoke_sample_api().await?;
    let trace = poll_for_trace(client).await?;

    check_api_trace(&response, &trace)?;
    tracing::info!(trace_id = %trace.trace_id, "Sample API trace verified");
    Ok(trace)
}
