use thiserror::Error;

pub mod command;
pub use command::{Command, CommandMetadata, Handler, OptionDefinition, ToolHints};

mod context;
pub use context::Context;

pub mod envelope;
pub use envelope::{ErrorKind, Response, ResponseResult};

mod executor;
pub use executor::{CommandExecutor, RawOptions};

pub mod options;

mod registry;
pub use registry::{analytics, CommandDescription, CommandGroup};

mod validation;
pub use validation::Validator;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown command {0}")]
    UnknownCommand(String),

    #[error("invalid options: {0}")]
    Binding(String),

    #[error("Missing required options: {}", .0.join(", "))]
    MissingOptions(Vec<String>),

    #[error(transparent)]
    Insights(#[from] fabric_analytics_insights::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCommand(_) | Self::Binding(_) | Self::MissingOptions(_) => ErrorKind::Validation,
            Self::Insights(e) if e.is_cancelled() => ErrorKind::Cancelled,
            Self::Insights(_) => ErrorKind::Execution,
        }
    }
}
