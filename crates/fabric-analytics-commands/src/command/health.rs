use async_trait::async_trait;
use fabric_analytics_client::CancellationToken;
use tracing::info;
use uuid::{uuid, Uuid};

use crate::command::{Command, CommandMetadata, ToolHints};
use crate::envelope::ResponseResult;
use crate::options::{HealthOptions, INCLUDE_METRICS, WORKSPACE_ID};
use crate::validation::Validator;
use crate::{Context, Error};

pub const ID: Uuid = uuid!("a1f80251-df7b-4054-953b-5f452c42dd01");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthRequest {
    pub workspace_id: String,
    pub include_metrics: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkspaceHealthCommand;

#[async_trait]
impl Command for WorkspaceHealthCommand {
    type Options = HealthOptions;
    type Request = HealthRequest;

    fn describe(&self) -> CommandMetadata {
        CommandMetadata {
            id: ID,
            name: "health",
            title: "Analyze Workspace Health",
            description: "Analyze the health status of a Microsoft Fabric workspace. This command checks workspace state, capacity \
                          assignment, and other health indicators. Returns health status, identified issues, and optional metrics.",
            options: vec![WORKSPACE_ID, INCLUDE_METRICS],
            hints: ToolHints::READ_ONLY,
        }
    }

    fn validate(&self, options: HealthOptions) -> Result<HealthRequest, Error> {
        let mut validator = Validator::new();
        let workspace_id = validator.required(&WORKSPACE_ID, options.workspace_id);
        validator.finish()?;

        Ok(HealthRequest {
            workspace_id,
            include_metrics: options.include_metrics,
        })
    }

    async fn execute(&self, context: &Context, request: HealthRequest, cancellation: &CancellationToken) -> Result<ResponseResult, Error> {
        info!(workspace_id = %request.workspace_id, "executing workspace health");

        let result = context
            .orchestrator
            .analyze_workspace_health(&request.workspace_id, request.include_metrics, cancellation)
            .await?;

        Ok(ResponseResult::WorkspaceHealth(result))
    }
}
