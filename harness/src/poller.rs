//! Retrying trace poller.
//!
//! The backend indexes spans asynchronously, so a trace generated a moment
//! ago may not be queryable yet. The poller fetches once per entry of a fixed
//! backoff schedule and sleeps for that entry whenever the fetch comes back
//! empty.

use crate::client::TraceClient;
use crate::error::{Error, Result};
use crate::models::Trace;
use std::future::Future;
use std::time::Duration;

/// Delays between trace fetches: 1s, 3s, then 10s.
pub const BACKOFF_SCHEDULE: [Duration; 3] = [
    Duration::from_secs(1),
    Duration::from_secs(3),
    Duration::from_secs(10),
];

/// Something that can be asked for the current trace of a service.
pub trait TraceSource {
    /// The service traces are fetched for, used in error messages.
    fn service(&self) -> &str;

    /// Fetches the trace, or `None` if it is not available yet.
    fn fetch_trace(&self) -> impl Future<Output = Result<Option<Trace>>> + Send;
}

impl TraceSource for TraceClient {
    fn service(&self) -> &str {
        TraceClient::service(self)
    }

    fn fetch_trace(&self) -> impl Future<Output = Result<Option<Trace>>> + Send {
        TraceClient::fetch_trace(self)
    }
}

/// Polls `source` using [`BACKOFF_SCHEDULE`].
///
/// # Errors
///
/// See [`poll_for_trace_with_schedule`].
pub async fn poll_for_trace<S: TraceSource>(source: &S) -> Result<Trace> {
    poll_for_trace_with_schedule(source, &BACKOFF_SCHEDULE).await
}

/// Polls `source` until it returns a trace or `schedule` is exhausted.
///
/// Each schedule entry allows one fetch; after an empty fetch the poller
/// sleeps for that entry's delay. A schedule of `n` delays therefore makes at
/// most `n` fetches and sleeps at most `n` times.
///
/// # Errors
///
/// Returns [`Error::TraceNotFound`] when every fetch came back empty. Errors
/// from the source are returned immediately, without further attempts.
pub async fn poll_for_trace_with_schedule<S: TraceSource>(
    source: &S,
    schedule: &[Duration],
) -> Result<Trace> {
    for (attempt, backoff) in schedule.iter().enumerate() {
        if let Some(trace) = source.fetch_trace().await? {
            tracing::info!(
                service = %source.service(),
                trace_id = %trace.trace_id,
                attempts = attempt + 1,
                "Trace found"
            );
            return Ok(trace);
        }

        tracing::info!(
            service = %source.service(),
            attempt = attempt + 1,
            "Trace not found yet, retrying in {backoff:?}"
        );
        tokio::time::sleep(*backoff).await;
    }

    tracing::error!(service = %source.service(), "Failed getting trace from the query API");

    Err(Error::TraceNotFound {
        service: source.service().to_string(),
        attempts: schedule.len(),
    })
}
