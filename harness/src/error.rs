//! Error types for the harness.
//!
//! Every variant is fatal to the scenario that produced it. The only
//! recoverable condition, an empty trace list, is not an error: the fetcher
//! returns `Ok(None)` and the poller decides whether to wait.

use crate::models::TraceValidationError;
use thiserror::Error;

/// Result type alias using the harness [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a scenario.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (refused, timed out, DNS).
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        /// The URL that was requested.
        endpoint: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but its body could not be read.
    #[error("Failed reading response body from {endpoint}: {source}")]
    ReadBody {
        /// The URL that was requested.
        endpoint: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The body was not a valid trace query response.
    #[error("Failed decoding JSON response from {endpoint}: {source}")]
    Decode {
        /// The URL that was requested.
        endpoint: String,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The backoff schedule ran out before a trace showed up.
    #[error("No trace found for service '{service}' after {attempts} attempt(s)")]
    TraceNotFound {
        /// The service that was queried.
        service: String,
        /// How many fetches were made.
        attempts: usize,
    },

    /// A trace (or sample response) was fetched but did not look as expected.
    #[error(transparent)]
    Expectation(#[from] ExpectationError),

    /// The configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),
}

impl Error {
    /// Returns true if this is a check on fetched content rather than a
    /// failure to talk to the backend or sample app.
    #[must_use]
    pub fn is_expectation(&self) -> bool {
        matches!(self, Self::Expectation(_))
    }
}

/// A fetched trace or sample response that does not match what the scenario
/// expects.
#[derive(Debug, Error, PartialEq)]
pub enum ExpectationError {
    /// The sample app answered with an unexpected body.
    #[error("Unexpected response from sample API: expected '{expected}', got '{actual}'")]
    UnexpectedResponse {
        /// The expected body.
        expected: String,
        /// The body received.
        actual: String,
    },

    /// The trace breaks a structural invariant (no ID, no spans).
    #[error(transparent)]
    InvalidTrace(#[from] TraceValidationError),

    /// The trace has the wrong number of spans.
    #[error("Expected {expected} span(s) in trace {trace_id}, found {actual}")]
    SpanCount {
        /// The trace that was checked.
        trace_id: String,
        /// Required number of spans.
        expected: usize,
        /// Number of spans present.
        actual: usize,
    },

    /// A span has the wrong operation name.
    #[error("Expected operation name '{expected}', got '{actual}'")]
    OperationName {
        /// The expected operation name.
        expected: String,
        /// The operation name found.
        actual: String,
    },

    /// No span with the expected operation name exists.
    #[error("No span named '{operation_name}' in trace {trace_id}")]
    SpanNotFound {
        /// The trace that was searched.
        trace_id: String,
        /// The operation name searched for.
        operation_name: String,
    },

    /// The span does not carry the expected tag.
    #[error("Span '{operation_name}' does not contain tag '{tag}'")]
    MissingTag {
        /// The span that was checked.
        operation_name: String,
        /// The tag that was expected, as `key:value`.
        tag: String,
    },
}
