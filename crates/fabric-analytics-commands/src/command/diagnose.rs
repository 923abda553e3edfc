use async_trait::async_trait;
use fabric_analytics_client::CancellationToken;
use tracing::info;
use uuid::{uuid, Uuid};

use crate::command::{Command, CommandMetadata, ToolHints};
use crate::envelope::ResponseResult;
use crate::options::{DiagnoseOptions, INCLUDE_RECOMMENDATIONS, NOTEBOOK_ID, WORKSPACE_ID};
use crate::validation::Validator;
use crate::{Context, Error};

pub const ID: Uuid = uuid!("a1f80251-df7b-4054-953b-5f452c42dd03");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnoseRequest {
    pub workspace_id: String,
    pub notebook_id: String,
    pub include_recommendations: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnoseNotebookCommand;

#[async_trait]
impl Command for DiagnoseNotebookCommand {
    type Options = DiagnoseOptions;
    type Request = DiagnoseRequest;

    fn describe(&self) -> CommandMetadata {
        CommandMetadata {
            id: ID,
            name: "diagnose",
            title: "Diagnose Notebook Issues",
            description: "Diagnose issues in a Microsoft Fabric notebook. This command analyzes notebook configuration, \
                          identifies potential issues, and provides recommendations for improvement.",
            options: vec![WORKSPACE_ID, NOTEBOOK_ID, INCLUDE_RECOMMENDATIONS],
            hints: ToolHints::READ_ONLY,
        }
    }

    fn validate(&self, options: DiagnoseOptions) -> Result<DiagnoseRequest, Error> {
        let mut validator = Validator::new();
        let workspace_id = validator.required(&WORKSPACE_ID, options.workspace_id);
        let notebook_id = validator.required(&NOTEBOOK_ID, options.notebook_id);
        validator.finish()?;

        Ok(DiagnoseRequest {
            workspace_id,
            notebook_id,
            include_recommendations: options.include_recommendations,
        })
    }

    async fn execute(&self, context: &Context, request: DiagnoseRequest, cancellation: &CancellationToken) -> Result<ResponseResult, Error> {
        info!(workspace_id = %request.workspace_id, notebook_id = %request.notebook_id, "executing notebook diagnose");

        let result = context
            .orchestrator
            .diagnose_notebook(&request.workspace_id, &request.notebook_id, request.include_recommendations, cancellation)
            .await?;

        Ok(ResponseResult::NotebookDiagnostic(result))
    }
}
