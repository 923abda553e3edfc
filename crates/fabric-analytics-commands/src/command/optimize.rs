use async_trait::async_trait;
use fabric_analytics_client::CancellationToken;
use tracing::info;
use uuid::{uuid, Uuid};

use crate::command::{Command, CommandMetadata, ToolHints};
use crate::envelope::ResponseResult;
use crate::options::{OptimizeOptions, INCLUDE_RECOMMENDATIONS, PIPELINE_ID, WORKSPACE_ID};
use crate::validation::Validator;
use crate::{Context, Error};

pub const ID: Uuid = uuid!("a1f80251-df7b-4054-953b-5f452c42dd02");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeRequest {
    pub workspace_id: String,
    pub pipeline_id: String,
    pub include_recommendations: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizePipelineCommand;

#[async_trait]
impl Command for OptimizePipelineCommand {
    type Options = OptimizeOptions;
    type Request = OptimizeRequest;

    fn describe(&self) -> CommandMetadata {
        CommandMetadata {
            id: ID,
            name: "optimize",
            title: "Optimize Pipeline Configuration",
            description: "Analyze and optimize a Microsoft Fabric data pipeline. This command reviews pipeline configuration, \
                          identifies performance issues, and provides optimization recommendations.",
            options: vec![WORKSPACE_ID, PIPELINE_ID, INCLUDE_RECOMMENDATIONS],
            hints: ToolHints::READ_ONLY,
        }
    }

    fn validate(&self, options: OptimizeOptions) -> Result<OptimizeRequest, Error> {
        let mut validator = Validator::new();
        let workspace_id = validator.required(&WORKSPACE_ID, options.workspace_id);
        let pipeline_id = validator.required(&PIPELINE_ID, options.pipeline_id);
        validator.finish()?;

        Ok(OptimizeRequest {
            workspace_id,
            pipeline_id,
            include_recommendations: options.include_recommendations,
        })
    }

    async fn execute(&self, context: &Context, request: OptimizeRequest, cancellation: &CancellationToken) -> Result<ResponseResult, Error> {
        info!(workspace_id = %request.workspace_id, pipeline_id = %request.pipeline_id, "executing pipeline optimize");

        let result = context
            .orchestrator
            .optimize_pipeline(&request.workspace_id, &request.pipeline_id, request.include_recommendations, cancellation)
            .await?;

        Ok(ResponseResult::PipelineOptimization(result))
    }
}
