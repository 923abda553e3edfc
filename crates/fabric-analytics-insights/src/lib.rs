use fabric_analytics_client::{CancellationToken, Client};
use fabric_analytics_common::log_if_error;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod advice;
pub use advice::Advice;

pub mod model;
pub mod result;

mod operation;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] fabric_analytics_client::Error),

    #[error("failed to decode {entity} response: {message}")]
    Decode { entity: &'static str, message: String },
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_cancelled())
    }
}

/// Fetches Fabric entities and derives health, optimization and diagnostic results from them.
/// Entities are fetched fresh on every call; nothing is kept between invocations.
#[derive(Clone)]
pub struct Orchestrator {
    client: Client,
    advice: Advice,
}

impl Orchestrator {
    pub fn new(client: Client) -> Self {
        Self::with_advice(client, Advice::default())
    }

    pub fn with_advice(client: Client, advice: Advice) -> Self {
        Self { client, advice }
    }

    pub fn advice(&self) -> &Advice {
        &self.advice
    }

    async fn fetch_entity<T: DeserializeOwned>(&self, entity: &'static str, segments: &[&str], cancellation: &CancellationToken) -> Result<T, Error> {
        let body = self.client.fetch(segments, cancellation).await?;

        log_if_error!(decode(entity, &body))
    }
}

/// Decoding failures are terminal, the body was received and will not change on retry
fn decode<T: DeserializeOwned>(entity: &'static str, body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Decode {
        entity,
        message: e.to_string(),
    })
}
