use std::fmt;
use std::str::FromStr;

use fabric_analytics_client::{
    Configuration as ClientConfiguration, Credentials, RetryConfiguration, DEFAULT_AUTHORITY_ENDPOINT, DEFAULT_FABRIC_ENDPOINT, DEFAULT_TIMEOUT,
};
use serde::Deserialize;

use crate::core::Error;

pub const ENVIRONMENT_PREFIX: &str = "FABRIC_";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerbosityConfiguration {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl FromStr for VerbosityConfiguration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(Error::Configuration(format!("invalid verbosity {}", s))),
        }
    }
}

/// Raw `FABRIC_` prefixed variables
#[derive(Clone, Default, Deserialize)]
struct Variables {
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,

    base_url: Option<String>,
    authority_url: Option<String>,

    max_attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
    timeout: Option<u64>,

    verbosity: Option<String>,
}

impl fmt::Debug for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variables")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("authority_url", &self.authority_url)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Configuration {
    pub verbosity: VerbosityConfiguration,
    variables: Variables,
}

impl Configuration {
    pub fn from_variables(variables: impl IntoIterator<Item = (String, String)>) -> Result<Self, Error> {
        let variables: Variables = envy::prefixed(ENVIRONMENT_PREFIX)
            .from_iter(variables)
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let verbosity = match variables.verbosity.as_deref() {
            Some(x) => VerbosityConfiguration::from_str(x)?,
            None => VerbosityConfiguration::default(),
        };

        Ok(Self { verbosity, variables })
    }

    /// Client configuration, failing when any credential is missing
    pub fn client(&self) -> Result<ClientConfiguration, Error> {
        let variables = &self.variables;

        let credentials = Credentials::new(
            variables.tenant_id.clone(),
            variables.client_id.clone(),
            variables.client_secret.clone(),
        )?;

        let defaults = RetryConfiguration::default();
        let retry = RetryConfiguration {
            max_attempts: variables.max_attempts.unwrap_or(defaults.max_attempts),
            base_delay_ms: variables.retry_delay_ms.unwrap_or(defaults.base_delay_ms),
        };

        if retry.max_attempts == 0 {
            return Err(Error::Configuration(format!("{}MAX_ATTEMPTS must be at least 1", ENVIRONMENT_PREFIX)));
        }

        Ok(ClientConfiguration {
            endpoint: variables.base_url.clone().unwrap_or_else(|| DEFAULT_FABRIC_ENDPOINT.to_string()),
            authority: variables.authority_url.clone().unwrap_or_else(|| DEFAULT_AUTHORITY_ENDPOINT.to_string()),
            credentials,
            retry,
            timeout: variables.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}
