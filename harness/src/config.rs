//! Harness configuration.
//!
//! The only runtime setting is the name of the sample application whose
//! traces are queried. The endpoints are fixed local URLs.

use crate::error::Result;
use validator::Validate;

/// Environment variable holding the sample application name.
pub const SAMPLE_ENV_VAR: &str = "TRACECHECK_SAMPLE";

/// Sample name used when none is configured.
pub const DEFAULT_SAMPLE: &str = "none";

/// Base URL of the trace query API.
pub const DEFAULT_QUERY_URL: &str = "http://localhost:16686";

/// Base URL of the instrumented sample application.
pub const DEFAULT_SAMPLE_API_URL: &str = "http://localhost:8080";

/// Harness configuration.
///
/// Configuration values can be set via environment variables:
/// - `TRACECHECK_SAMPLE`: The sample app (service name) to query traces for (default: "none")
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Config {
    /// The service name traces are queried for.
    #[validate(length(min = 1, message = "Sample name cannot be empty"))]
    pub sample: String,
}

impl Config {
    /// Creates a configuration for the given sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample name is empty.
    pub fn new(sample: impl Into<String>) -> Result<Self> {
        let config = Self {
            sample: sample.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TRACECHECK_SAMPLE` is set to an empty string.
    pub fn from_env() -> Result<Self> {
        let sample =
            std::env::var(SAMPLE_ENV_VAR).unwrap_or_else(|_| DEFAULT_SAMPLE.to_string());
        Self::new(sample)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample: DEFAULT_SAMPLE.to_string(),
        }
    }
}

/// Base URLs of the two external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base URL of the trace query API.
    pub query_url: String,
    /// Base URL of the sample application.
    pub sample_api_url: String,
}

impl Endpoints {
    /// Creates endpoints from explicit base URLs. Trailing slashes are dropped.
    #[must_use]
    pub fn new(query_url: impl Into<String>, sample_api_url: impl Into<String>) -> Self {
        Self {
            query_url: query_url.into().trim_end_matches('/').to_string(),
            sample_api_url: sample_api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of the trace search endpoint (without the query string).
    #[must_use]
    pub fn traces_url(&self) -> String {
        format!("{}/api/traces", self.query_url)
    }

    /// URL of the sample app's hello world endpoint.
    #[must_use]
    pub fn helloworld_url(&self) -> String {
        format!("{}/helloworld", self.sample_api_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_URL, DEFAULT_SAMPLE_API_URL)
    }
}
