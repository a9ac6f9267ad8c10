//! HTTP client for the sample application and the trace query API.
//!
//! Both calls are plain GETs. Transport and decoding failures are returned as
//! errors and never retried here; waiting for a trace to appear is the
//! poller's job.

use crate::config::{Config, Endpoints};
use crate::error::{Error, Result};
use crate::models::{Trace, TraceQueryResult};

/// Client for the two external collaborators of a scenario.
///
/// # Example
///
/// ```no_run
/// use harness::{Config, TraceClient};
///
/// # async fn run() -> harness::Result<()> {
/// let client = TraceClient::new(&Config::from_env()?);
/// let greeting = client.invoke_sample_api().await?;
/// let trace = client.fetch_trace().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TraceClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    service: String,
}

impl TraceClient {
    /// Creates a client for the configured sample using the default local
    /// endpoints.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_endpoints(config, Endpoints::default())
    }

    /// Creates a client that talks to the given endpoints.
    #[must_use]
    pub fn with_endpoints(config: &Config, endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
            service: config.sample.clone(),
        }
    }

    /// The service name traces are queried for.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The endpoints this client talks to.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Calls the sample app's hello world endpoint and returns the body.
    ///
    /// The call exists for its side effect: the sample app records a span
    /// while handling it. The status code is logged, not checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if no response arrives and
    /// [`Error::ReadBody`] if the body cannot be read.
    pub async fn invoke_sample_api(&self) -> Result<String> {
        let endpoint = self.endpoints.helloworld_url();
        tracing::info!(
            sample = %self.service,
            %endpoint,
            "Going to call the sample API to generate trace"
        );

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|source| Error::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        tracing::info!(status = %response.status(), "Received response from the sample API");

        response
            .text()
            .await
            .map_err(|source| Error::ReadBody { endpoint, source })
    }

    /// Queries the trace API for the configured service and decodes the
    /// whole response.
    ///
    /// The decoded data is logged as indented JSON for post-hoc debugging.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`], [`Error::ReadBody`] or
    /// [`Error::Decode`]. None of them are worth retrying.
    pub async fn query_traces(&self) -> Result<TraceQueryResult> {
        let endpoint = self.endpoints.traces_url();
        tracing::info!(
            service = %self.service,
            %endpoint,
            "Going to call the trace query API to fetch trace"
        );

        let response = self
            .http
            .get(&endpoint)
            .query(&[("service", self.service.as_str())])
            .send()
            .await
            .map_err(|source| Error::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        tracing::info!(status = %response.status(), "Received response from the trace query API");

        let body = response.text().await.map_err(|source| Error::ReadBody {
            endpoint: endpoint.clone(),
            source,
        })?;

        let data: TraceQueryResult =
            serde_json::from_str(&body).map_err(|source| Error::Decode { endpoint, source })?;

        if let Ok(pretty) = serde_json::to_string_pretty(&data) {
            tracing::info!("Data received from the trace query API:\n{pretty}");
        }

        Ok(data)
    }

    /// Fetches the first trace for the configured service.
    ///
    /// Returns `Ok(None)` while the backend has no trace for the service yet.
    /// When several traces exist, the one the backend lists first is
    /// returned.
    ///
    /// # Errors
    ///
    /// Same as [`TraceClient::query_traces`].
    pub async fn fetch_trace(&self) -> Result<Option<Trace>> {
        let data = self.query_traces().await?;
        if data.is_empty() {
            tracing::info!(service = %self.service, "No trace indexed for service yet");
            return Ok(None);
        }
        Ok(data.first_trace())
    }
}
