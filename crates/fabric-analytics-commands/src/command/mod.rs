use async_trait::async_trait;
use fabric_analytics_client::CancellationToken;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::envelope::ResponseResult;
use crate::executor::RawOptions;
use crate::{Context, Error};

mod diagnose;
pub use diagnose::{DiagnoseNotebookCommand, DiagnoseRequest};

mod health;
pub use health::{HealthRequest, WorkspaceHealthCommand};

mod optimize;
pub use optimize::{OptimizePipelineCommand, OptimizeRequest};

/// Behavioural hints published with every command. All analytics commands only read remote state.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolHints {
    pub destructive: bool,
    pub idempotent: bool,
    pub open_world: bool,
    pub read_only: bool,
    pub local_required: bool,
    pub secret: bool,
}

impl ToolHints {
    pub const READ_ONLY: Self = Self {
        destructive: false,
        idempotent: true,
        open_world: false,
        read_only: true,
        local_required: false,
        secret: false,
    };
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptionDefinition {
    pub name: &'static str,
    pub short: char,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandMetadata {
    pub id: Uuid,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionDefinition>,
    pub hints: ToolHints,
}

/// A command binds its raw options into [`Command::Options`], validates them into a
/// [`Command::Request`] and only then executes. Execution never starts on invalid options.
#[async_trait]
pub trait Command: 'static + Send + Sync {
    type Options: DeserializeOwned + Send;
    type Request: Send;

    fn describe(&self) -> CommandMetadata;

    fn validate(&self, options: Self::Options) -> Result<Self::Request, Error>;

    async fn execute(&self, context: &Context, request: Self::Request, cancellation: &CancellationToken) -> Result<ResponseResult, Error>;
}

/// Object safe view over a [`Command`], used by the registry
#[async_trait]
pub trait Handler: Send + Sync {
    fn metadata(&self) -> CommandMetadata;

    async fn handle(&self, context: &Context, options: RawOptions, cancellation: &CancellationToken) -> Result<ResponseResult, Error>;
}

#[async_trait]
impl<C: Command> Handler for C {
    fn metadata(&self) -> CommandMetadata {
        self.describe()
    }

    async fn handle(&self, context: &Context, options: RawOptions, cancellation: &CancellationToken) -> Result<ResponseResult, Error> {
        let options = bind::<C::Options>(options)?;
        let request = self.validate(options)?;

        self.execute(context, request, cancellation).await
    }
}

fn bind<T: DeserializeOwned>(options: RawOptions) -> Result<T, Error> {
    serde_json::from_value(serde_json::Value::Object(options)).map_err(|e| Error::Binding(e.to_string()))
}
