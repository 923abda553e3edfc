use thiserror::Error;

pub mod context;

mod tracing;
pub use tracing::Fmt;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error {0}")]
    Configuration(String),

    #[error("tracing error {0}")]
    Tracing(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl From<fabric_analytics_client::Error> for Error {
    fn from(value: fabric_analytics_client::Error) -> Self {
        match value {
            fabric_analytics_client::Error::Configuration(message) => Self::Configuration(message),
            e => Self::Configuration(e.to_string()),
        }
    }
}
