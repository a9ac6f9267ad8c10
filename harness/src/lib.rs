//! Tracecheck Harness Library
//!
//! End-to-end checks that a sample application's spans become visible
//! through a trace query API.
//!
//! # Modules
//!
//! - [`models`] - Trace, span and tag types decoded from query responses
//! - [`client`] - HTTP calls to the sample app and the trace query API
//! - [`poller`] - Fixed-schedule retry loop waiting for a trace to appear
//! - [`scenario`] - The end-to-end scenarios and their checks
//! - [`config`] - The sample name and endpoint constants
//!
//! # Example
//!
//! ```no_run
//! use harness::{scenario, Config, TraceClient};
//!
//! # async fn run() -> harness::Result<()> {
//! let client = TraceClient::new(&Config::from_env()?);
//! let trace = scenario::run_api_scenario(&client).await?;
//! println!("verified trace {}", trace.trace_id);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod scenario;

pub use client::TraceClient;
pub use config::{Config, Endpoints};
pub use error::{Error, ExpectationError, Result};
pub use poller::{poll_for_trace, BACKOFF_SCHEDULE};

/// Re-export common dependencies for convenience.
pub use serde_json;
