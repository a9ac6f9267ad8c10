//! Data models for trace query responses.
//!
//! These mirror the JSON returned by the trace query API and are built fresh
//! from every response body.

pub mod trace;

pub use trace::{Span, Tag, TagValue, Trace, TraceQueryResult, TraceValidationError};
