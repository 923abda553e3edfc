use fabric_analytics_client::CancellationToken;
use tracing::{info, instrument};

use crate::model::Pipeline;
use crate::result::PipelineOptimizationResult;
use crate::{Error, Orchestrator};

impl Orchestrator {
    pub async fn get_pipeline(&self, workspace_id: &str, pipeline_id: &str, cancellation: &CancellationToken) -> Result<Pipeline, Error> {
        info!(workspace_id, pipeline_id, "getting pipeline");

        self.fetch_entity("pipeline", &["workspaces", workspace_id, "items", pipeline_id], cancellation).await
    }

    #[instrument(name = "optimize_pipeline", skip(self, cancellation))]
    pub async fn optimize_pipeline(
        &self,
        workspace_id: &str,
        pipeline_id: &str,
        include_recommendations: bool,
        cancellation: &CancellationToken,
    ) -> Result<PipelineOptimizationResult, Error> {
        info!(workspace_id, pipeline_id, "optimizing pipeline");

        let pipeline = self.get_pipeline(workspace_id, pipeline_id, cancellation).await?;

        Ok(PipelineOptimizationResult::from_pipeline(&pipeline, self.advice(), include_recommendations))
    }
}
