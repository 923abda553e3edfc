use fabric_analytics_client::CancellationToken;
use tracing::{info, instrument};

use crate::model::Workspace;
use crate::result::WorkspaceHealthResult;
use crate::{Error, Orchestrator};

impl Orchestrator {
    pub async fn get_workspace(&self, workspace_id: &str, cancellation: &CancellationToken) -> Result<Workspace, Error> {
        info!(workspace_id, "getting workspace");

        self.fetch_entity("workspace", &["workspaces", workspace_id], cancellation).await
    }

    #[instrument(name = "analyze_workspace_health", skip(self, cancellation))]
    pub async fn analyze_workspace_health(
        &self,
        workspace_id: &str,
        include_metrics: bool,
        cancellation: &CancellationToken,
    ) -> Result<WorkspaceHealthResult, Error> {
        info!(workspace_id, "analyzing workspace health");

        let workspace = self.get_workspace(workspace_id, cancellation).await?;

        Ok(WorkspaceHealthResult::from_workspace(&workspace, include_metrics))
    }
}

#[cfg(test)]
mod tests {
    use fabric_analytics_client::mock::{ScriptedTransport, Step};
    use fabric_analytics_client::{CancellationToken, Error as ClientError};

    use crate::operation::testing::orchestrator;
    use crate::result::WorkspaceMetrics;
    use crate::Error;

    #[tokio::test]
    async fn healthy_workspace_with_metrics() {
        // Given
        let transport = ScriptedTransport::new().with(
            "workspaces/ws1",
            Step::body(r#"{"id":"ws1","name":"Sales","state":"Active","capacityId":"cap1"}"#),
        );

        // When
        let result = orchestrator(&transport)
            .analyze_workspace_health("ws1", true, &CancellationToken::new())
            .await
            .unwrap();

        // Then
        assert_eq!(result.workspace_id, "ws1");
        assert_eq!(result.workspace_name, "Sales");
        assert_eq!(result.health_status, "Healthy");
        assert!(result.issues.is_empty());
        assert_eq!(
            result.metrics,
            Some(WorkspaceMetrics {
                state: "Active".to_string(),
                has_capacity: true,
                issue_count: 0,
            })
        );
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(transport.calls()[0].path, "workspaces/ws1");
    }

    #[tokio::test]
    async fn inactive_workspace_is_a_warning() {
        let transport = ScriptedTransport::new().with(
            "workspaces/ws1",
            Step::body(r#"{"id":"ws1","name":"Sales","state":"Inactive"}"#),
        );

        let result = orchestrator(&transport)
            .analyze_workspace_health("ws1", false, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.health_status, "Warning");
        assert!(result.issues.iter().any(|x| x.contains("Inactive")));
        assert!(result.metrics.is_none());
    }

    #[tokio::test]
    async fn malformed_workspace_is_not_retried() {
        let transport = ScriptedTransport::new()
            .with("workspaces/ws1", Step::body(r#"{"workspace":"ws1"}"#))
            .with("workspaces/ws1", Step::body(r#"{"id":"ws1","name":"Sales","state":"Active"}"#));

        let result = orchestrator(&transport)
            .analyze_workspace_health("ws1", false, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(Error::Decode { entity: "workspace", .. })));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_as_fetch_error() {
        let transport = ScriptedTransport::new()
            .with("workspaces/ws1", Step::status(500))
            .with("workspaces/ws1", Step::status(500))
            .with("workspaces/ws1", Step::status(500));

        let result = orchestrator(&transport)
            .analyze_workspace_health("ws1", false, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(Error::Fetch(ClientError::RequestFailed { attempts: 3, .. }))));
    }
}
