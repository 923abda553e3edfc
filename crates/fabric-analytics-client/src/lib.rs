use std::fmt;
use std::time::Duration;

use fabric_analytics_common::{measure_duration, metric};
use reqwest::Url;
use thiserror::Error;
use tokio::time;
use tracing::{error, info, instrument, warn};

pub use tokio_util::sync::CancellationToken;

use crate::http::HttpTransport;
pub use crate::retry::{RetryConfiguration, RetryPolicy};

mod auth;
mod http;
mod retry;

#[cfg(feature = "testing")]
pub mod mock;

pub const DEFAULT_FABRIC_ENDPOINT: &str = "https://api.fabric.microsoft.com/v1";
pub const DEFAULT_AUTHORITY_ENDPOINT: &str = "https://login.microsoftonline.com";
pub const DEFAULT_TIMEOUT: u64 = 30;

macro_rules! log_if_error {
    ($e: expr) => {{
        let result = $e;
        match &result {
            Err(e @ Error::Cancelled) => info!(message = %e),
            Err(e @ Error::RequestFailed { .. }) => error!(message = %e),
            Err(e @ Error::Configuration(_)) => error!(message = %e),
            Err(e @ Error::URL(_)) => error!(message = %e),
            Err(e) => warn!(message = %e),
            _ => (),
        };
        result
    }};
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid url {0}")]
    URL(String),

    #[error(transparent)]
    HTTP(#[from] reqwest::Error),

    #[error("request returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication error {0}")]
    Authentication(String),

    #[error("request failed after {attempts} attempts: {source}")]
    RequestFailed {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error("configuration error {0}")]
    Configuration(String),
}

impl Error {
    /// Transport level failures that a new attempt may resolve
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HTTP(_) | Self::Status { .. } | Self::Authentication(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Service principal used to obtain access tokens. All three values are required.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Builds credentials, reporting every missing or blank value at once
    pub fn new(tenant_id: Option<String>, client_id: Option<String>, client_secret: Option<String>) -> Result<Self, Error> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|x| !x.trim().is_empty())
        }

        let (tenant_id, client_id, client_secret) = (present(tenant_id), present(client_id), present(client_secret));

        let missing: Vec<&str> = [
            ("FABRIC_TENANT_ID", tenant_id.is_none()),
            ("FABRIC_CLIENT_ID", client_id.is_none()),
            ("FABRIC_CLIENT_SECRET", client_secret.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect();

        match (tenant_id, client_id, client_secret) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(Self {
                tenant_id,
                client_id,
                client_secret,
            }),
            _ => Err(Error::Configuration(format!("missing required environment variables: {}", missing.join(", ")))),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Configuration {
    pub endpoint: String,
    pub authority: String,
    pub credentials: Credentials,

    pub retry: RetryConfiguration,

    /// Per request timeout in seconds
    pub timeout: u64,
}

impl Configuration {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            endpoint: DEFAULT_FABRIC_ENDPOINT.to_string(),
            authority: DEFAULT_AUTHORITY_ENDPOINT.to_string(),
            credentials,
            retry: RetryConfiguration::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Clone)]
enum Transport {
    #[cfg(feature = "testing")]
    Mock(std::sync::Arc<dyn mock::MockTransport>),

    Http(HttpTransport),
}

/// Resilient GET client for the Fabric REST API. Transient failures are retried with
/// exponential backoff, and cancellation is observed before every request and during
/// every backoff wait. The client holds no per-request state and can be cloned freely.
#[derive(Clone)]
pub struct Client {
    endpoint: String,
    retry: RetryPolicy,
    transport: Transport,
}

impl Client {
    pub fn new(configuration: &Configuration) -> Result<Self, Error> {
        let timeout = Duration::from_secs(configuration.timeout);

        Ok(Self {
            endpoint: configuration.endpoint.clone(),
            retry: RetryPolicy::new(&configuration.retry),
            transport: Transport::Http(HttpTransport::new(&configuration.authority, &configuration.credentials, timeout)?),
        })
    }

    #[cfg(feature = "testing")]
    pub fn mock<T: mock::MockTransport>(transport: T, retry: RetryConfiguration) -> Self {
        Self {
            endpoint: DEFAULT_FABRIC_ENDPOINT.to_string(),
            retry: RetryPolicy::new(&retry),
            transport: Transport::Mock(std::sync::Arc::new(transport)),
        }
    }

    /// Appends `segments` to the base endpoint. Every segment is percent encoded on its own, so
    /// an identifier holding `/`, `?` or `#` never leaves its segment.
    pub fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        self.locate(segments).map(|(url, _)| url)
    }

    /// Url of `segments` together with the offset in its path where the segments start
    fn locate(&self, segments: &[&str]) -> Result<(Url, usize), Error> {
        if let Some(segment) = segments.iter().find(|x| matches!(**x, "" | "." | "..")) {
            return Err(Error::URL(format!("{}: invalid path segment {:?}", self.endpoint, segment)));
        }

        let mut url = Url::parse(&self.endpoint).map_err(|e| Error::URL(format!("{}: {}", self.endpoint, e)))?;
        let offset = url.path().trim_end_matches('/').len() + 1;

        url.path_segments_mut()
            .map_err(|_| Error::URL(format!("{}: cannot be a base", self.endpoint)))?
            .pop_if_empty()
            .extend(segments);

        Ok((url, offset))
    }

    /// Fetches the raw body found at the resource addressed by `segments`.
    ///
    /// Returns [`Error::Cancelled`] as soon as cancellation is observed, [`Error::RequestFailed`]
    /// once every attempt failed with a retryable error, and any non retryable error as is.
    #[instrument(name = "fetch", skip(self, cancellation))]
    pub async fn fetch(&self, segments: &[&str], cancellation: &CancellationToken) -> Result<String, Error> {
        let (result, duration) = measure_duration!(log_if_error!(self.fetch_with_retry(segments, cancellation).await));

        metric!(counter[fabric_request] = 1, method = "fetch");
        metric!(histogram[fabric_request_duration_milliseconds] = duration.as_millis(), method = "fetch");
        metric!(on error result => counter[fabric_request_error] = 1, method = "fetch");

        result
    }

    async fn fetch_with_retry(&self, segments: &[&str], cancellation: &CancellationToken) -> Result<String, Error> {
        let (url, offset) = self.locate(segments)?;
        let path = url.path().get(offset..).unwrap_or_default();
        let max_attempts = self.retry.max_attempts();

        let mut attempt = 1;
        loop {
            if cancellation.is_cancelled() {
                return Err(Error::Cancelled);
            }

            info!(url = %url, attempt, max_attempts, "making GET request");
            let error = match self.attempt(&url, path).await {
                Ok(body) => {
                    info!(url = %url, attempt, "successfully retrieved data");
                    return Ok(body);
                },
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= max_attempts => {
                    return Err(Error::RequestFailed {
                        attempts: attempt,
                        source: Box::new(e),
                    })
                },
                Err(e) => e,
            };

            let delay = self.retry.delay(attempt);
            warn!(
                error = %error,
                delay_ms = delay.as_millis() as u64,
                retry = attempt,
                max_attempts,
                "request failed, retrying"
            );

            if cancellation.is_cancelled() {
                return Err(Error::Cancelled);
            }

            tokio::select! {
                _ = cancellation.cancelled() => return Err(Error::Cancelled),
                _ = time::sleep(delay) => {},
            }

            attempt += 1;
        }
    }

    #[cfg_attr(not(feature = "testing"), allow(unused_variables))]
    async fn attempt(&self, url: &Url, path: &str) -> Result<String, Error> {
        match &self.transport {
            #[cfg(feature = "testing")]
            Transport::Mock(transport) => transport.get(path).await,

            Transport::Http(transport) => transport.get(url.clone()).await,
        }
    }
}
