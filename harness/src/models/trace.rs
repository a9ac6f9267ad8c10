//! Trace, span and tag models as returned by the trace query API.
//!
//! Field names follow the query API's JSON shape (`traceID`, `spanID`,
//! `operationName`) so that re-serializing a decoded value reproduces what
//! the backend sent.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Decodes a JSON array that the backend may send as `null` instead of `[]`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Value of a span tag.
///
/// The query API does not fix the type of a tag value, so this covers the
/// three primitive shapes it emits. Equality is type-sensitive: the string
/// `"1"` is not equal to the number `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// A boolean tag value.
    Bool(bool),
    /// A numeric tag value, kept as decoded.
    Number(serde_json::Number),
    /// A string tag value.
    String(String),
}

impl std::fmt::Display for TagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// A key/value pair attached to a span.
///
/// # Example
///
/// ```
/// use harness::models::Tag;
///
/// let tag = Tag::new("foo", "bar");
/// assert_eq!(tag.to_string(), "foo:bar");
/// assert_ne!(tag, Tag::new("foo", true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag key.
    pub key: String,
    /// The tag value.
    pub value: TagValue,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// A single unit of work within a trace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    /// ID of the trace this span belongs to.
    #[serde(rename = "traceID", default)]
    pub trace_id: String,

    /// Unique identifier for this span.
    #[serde(rename = "spanID", default)]
    pub span_id: String,

    /// The operation this span records.
    #[serde(rename = "operationName", default)]
    pub operation_name: String,

    /// Tags attached to the span, in no particular order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<Tag>,
}

impl Span {
    /// Creates a span with no tags.
    #[must_use]
    pub fn new(
        trace_id: impl Into<String>,
        span_id: impl Into<String>,
        operation_name: impl Into<String>,
    ) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
            operation_name: operation_name.into(),
            tags: Vec::new(),
        }
    }

    /// Adds a tag to the span.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    /// Returns true if the span carries a tag equal to `tag` (key and value).
    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

/// Errors that can occur during trace validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceValidationError {
    /// The trace ID is empty.
    #[error("Trace ID cannot be empty")]
    EmptyTraceId,

    /// The trace has no spans.
    #[error("Trace must contain at least one span")]
    NoSpans,
}

/// A trace: the spans sharing one trace ID.
///
/// # Example
///
/// ```
/// use harness::models::{Span, Tag, Trace};
///
/// let trace = Trace::new("abc")
///     .with_span(Span::new("abc", "1", "HelloWorldSpan").with_tag("foo", "bar"));
///
/// let span = trace.find_span("HelloWorldSpan").unwrap();
/// assert!(span.has_tag(&Tag::new("foo", "bar")));
/// assert!(trace.validate_trace().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    /// The trace ID.
    #[serde(rename = "traceID", default)]
    pub trace_id: String,

    /// Spans in the order the backend returned them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub spans: Vec<Span>,
}

impl Trace {
    /// Creates an empty trace with the given ID.
    #[must_use]
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            spans: Vec::new(),
        }
    }

    /// Appends a span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    /// Returns the number of spans in this trace.
    #[must_use]
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Returns the first span with the given operation name, wherever it sits
    /// in the span list.
    #[must_use]
    pub fn find_span(&self, operation_name: &str) -> Option<&Span> {
        self.spans
            .iter()
            .find(|s| s.operation_name == operation_name)
    }

    /// Returns the first span that has the given operation name and carries
    /// `tag`. Other spans with the same name are skipped.
    #[must_use]
    pub fn find_tagged_span(&self, operation_name: &str, tag: &Tag) -> Option<&Span> {
        self.spans
            .iter()
            .find(|s| s.operation_name == operation_name && s.has_tag(tag))
    }

    /// Validates the trace.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The trace ID is empty
    /// - The trace has no spans
    pub fn validate_trace(&self) -> Result<(), TraceValidationError> {
        if self.trace_id.is_empty() {
            return Err(TraceValidationError::EmptyTraceId);
        }
        if self.spans.is_empty() {
            return Err(TraceValidationError::NoSpans);
        }
        Ok(())
    }
}

/// The envelope returned by one trace query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraceQueryResult {
    /// Matching traces, in backend order.
    #[serde(rename = "data", default, deserialize_with = "null_as_empty")]
    pub traces: Vec<Trace>,
}

impl TraceQueryResult {
    /// Consumes the result and returns the trace at index 0, if any.
    ///
    /// No ordering is implied: when the backend returns several traces for
    /// the service, whichever it lists first is returned.
    #[must_use]
    pub fn first_trace(self) -> Option<Trace> {
        self.traces.into_iter().next()
    }

    /// Returns true if the query matched no traces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}
