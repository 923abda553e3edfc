use fabric_analytics_client::CancellationToken;
use tracing::{info, instrument};

use crate::model::Notebook;
use crate::result::NotebookDiagnosticResult;
use crate::{Error, Orchestrator};

impl Orchestrator {
    pub async fn get_notebook(&self, workspace_id: &str, notebook_id: &str, cancellation: &CancellationToken) -> Result<Notebook, Error> {
        info!(workspace_id, notebook_id, "getting notebook");

        self.fetch_entity("notebook", &["workspaces", workspace_id, "items", notebook_id], cancellation).await
    }

    #[instrument(name = "diagnose_notebook", skip(self, cancellation))]
    pub async fn diagnose_notebook(
        &self,
        workspace_id: &str,
        notebook_id: &str,
        include_recommendations: bool,
        cancellation: &CancellationToken,
    ) -> Result<NotebookDiagnosticResult, Error> {
        info!(workspace_id, notebook_id, "diagnosing notebook");

        let notebook = self.get_notebook(workspace_id, notebook_id, cancellation).await?;

        Ok(NotebookDiagnosticResult::from_notebook(&notebook, self.advice(), include_recommendations))
    }
}

#[cfg(test)]
mod tests {
    use fabric_analytics_client::mock::{ScriptedTransport, Step};
    use fabric_analytics_client::CancellationToken;

    use crate::operation::testing::orchestrator;

    #[tokio::test]
    async fn diagnose_with_recommendations() {
        // Given
        let transport = ScriptedTransport::new().with(
            "workspaces/ws1/items/n1",
            Step::body(r#"{"id":"n1","name":"Explore","workspaceId":"ws1"}"#),
        );

        // When
        let result = orchestrator(&transport)
            .diagnose_notebook("ws1", "n1", true, &CancellationToken::new())
            .await
            .unwrap();

        // Then
        assert_eq!(result.notebook_id, "n1");
        assert_eq!(result.notebook_name, "Explore");
        assert_eq!(result.diagnostic_status, "Healthy");
        assert!(result.issues.is_empty());
        assert_eq!(result.recommendations().len(), 3);
        assert_eq!(result.recommendations()[2], "Consider breaking large notebooks into smaller ones");
    }

    #[tokio::test]
    async fn cancelled_diagnosis_makes_no_request() {
        let transport = ScriptedTransport::new().with(
            "workspaces/ws1/items/n1",
            Step::body(r#"{"id":"n1","name":"Explore","workspaceId":"ws1"}"#),
        );
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let result = orchestrator(&transport).diagnose_notebook("ws1", "n1", false, &cancellation).await;

        assert!(result.unwrap_err().is_cancelled());
        assert!(transport.calls().is_empty());
    }
}
