use std::sync::Arc;

use fabric_analytics_client::CancellationToken;
use fabric_analytics_common::{measure_duration, metric};
use tracing::{error, info, instrument, warn};

use crate::envelope::{ErrorKind, Response, ResponseResult};
use crate::registry::{analytics, CommandGroup};
use crate::{Context, Error};

/// Options as received from the caller, keyed by long option name
pub type RawOptions = serde_json::Map<String, serde_json::Value>;

/// Runs commands by path (e.g. `workspace health`) and always answers with a [`Response`]
#[derive(Clone)]
pub struct CommandExecutor {
    context: Context,
    commands: Arc<CommandGroup>,
}

impl CommandExecutor {
    pub fn new(context: Context) -> Self {
        Self::with_commands(context, analytics())
    }

    pub fn with_commands(context: Context, commands: CommandGroup) -> Self {
        Self {
            context,
            commands: Arc::new(commands),
        }
    }

    #[instrument(name = "execute", skip(self, options, cancellation))]
    pub async fn execute(&self, command: &str, options: RawOptions, cancellation: &CancellationToken) -> Response {
        let (result, duration) = measure_duration!(self.run(command, options, cancellation).await);

        match &result {
            Ok(results) => info!(schema = results.schema(), "command succeeded"),
            Err(e) => match e.kind() {
                ErrorKind::Validation => warn!(message = %e, "invalid command"),
                ErrorKind::Cancelled => info!(message = %e, "command cancelled"),
                ErrorKind::Execution => error!(message = %e, "command failed"),
            },
        }

        metric!(counter[fabric_command] = 1, command = command);
        metric!(histogram[fabric_command_duration_milliseconds] = duration.as_millis(), command = command);
        metric!(on error result => counter[fabric_command_error] = 1, command = command);

        Response::from(result)
    }

    async fn run(&self, command: &str, options: RawOptions, cancellation: &CancellationToken) -> Result<ResponseResult, Error> {
        let handler = self
            .commands
            .find(command)
            .ok_or_else(|| Error::UnknownCommand(command.to_string()))?;

        handler.handle(&self.context, options, cancellation).await
    }
}

#[cfg(test)]
mod tests {
    use fabric_analytics_client::mock::{ScriptedTransport, Step};
    use fabric_analytics_client::{CancellationToken, Client, RetryConfiguration};
    use fabric_analytics_insights::Orchestrator;
    use serde_json::json;

    use super::*;

    fn executor(transport: &ScriptedTransport) -> CommandExecutor {
        let client = Client::mock(
            transport.clone(),
            RetryConfiguration {
                max_attempts: 3,
                base_delay_ms: 1,
            },
        );

        CommandExecutor::new(Context::new(Orchestrator::new(client)))
    }

    fn options(value: serde_json::Value) -> RawOptions {
        match value {
            serde_json::Value::Object(x) => x,
            _ => panic!("options must be an object"),
        }
    }

    #[tokio::test]
    async fn workspace_health_succeeds() {
        // Given
        let transport = ScriptedTransport::new().with(
            "workspaces/ws1",
            Step::body(r#"{"id":"ws1","name":"Sales","state":"Active","capacityId":"cap1"}"#),
        );

        // When
        let response = executor(&transport)
            .execute(
                "workspace health",
                options(json!({ "workspace-id": "ws1", "include-metrics": true })),
                &CancellationToken::new(),
            )
            .await;

        // Then
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "success",
                "results": {
                    "schema": "WorkspaceHealthResult",
                    "value": {
                        "WorkspaceId": "ws1",
                        "WorkspaceName": "Sales",
                        "HealthStatus": "Healthy",
                        "Issues": [],
                        "Metrics": { "State": "Active", "HasCapacity": true, "IssueCount": 0 }
                    }
                }
            })
        );
    }

    #[tokio::test]
    async fn missing_options_never_reach_the_network() {
        let transport = ScriptedTransport::new();

        let response = executor(&transport)
            .execute("pipeline optimize", options(json!({ "include-recommendations": true })), &CancellationToken::new())
            .await;

        assert_eq!(
            response,
            Response::Error {
                kind: ErrorKind::Validation,
                message: "Missing required options: workspace-id, pipeline-id".to_string(),
                cause: None,
            }
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn wrong_option_type_is_a_validation_error() {
        let transport = ScriptedTransport::new();

        let response = executor(&transport)
            .execute(
                "notebook diagnose",
                options(json!({ "workspace-id": "ws1", "notebook-id": 12 })),
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            response,
            Response::Error {
                kind: ErrorKind::Validation,
                ..
            }
        ));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_command_is_a_validation_error() {
        let transport = ScriptedTransport::new();

        let response = executor(&transport)
            .execute("workspace delete", RawOptions::new(), &CancellationToken::new())
            .await;

        assert_eq!(
            response,
            Response::Error {
                kind: ErrorKind::Validation,
                message: "unknown command workspace delete".to_string(),
                cause: None,
            }
        );
    }

    #[tokio::test]
    async fn exhausted_retries_become_execution_error() {
        let transport = ScriptedTransport::new()
            .with("workspaces/ws1/items/p1", Step::status(500))
            .with("workspaces/ws1/items/p1", Step::status(500))
            .with("workspaces/ws1/items/p1", Step::status(500));

        let response = executor(&transport)
            .execute(
                "pipeline optimize",
                options(json!({ "workspace-id": "ws1", "pipeline-id": "p1" })),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(
            response,
            Response::Error {
                kind: ErrorKind::Execution,
                message: "request failed after 3 attempts: request returned status 500: ".to_string(),
                cause: Some("request returned status 500: ".to_string()),
            }
        );
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn cancelled_token_becomes_cancelled_error() {
        let transport = ScriptedTransport::new();
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let response = executor(&transport)
            .execute("notebook diagnose", options(json!({ "workspace-id": "ws1", "notebook-id": "n1" })), &cancellation)
            .await;

        assert!(matches!(
            response,
            Response::Error {
                kind: ErrorKind::Cancelled,
                ..
            }
        ));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn notebook_diagnose_includes_recommendations() {
        let transport = ScriptedTransport::new().with(
            "workspaces/ws1/items/n1",
            Step::body(r#"{"id":"n1","name":"Explore","workspaceId":"ws1"}"#),
        );

        let response = executor(&transport)
            .execute(
                "notebook diagnose",
                options(json!({ "workspace-id": "ws1", "notebook-id": "n1", "include-recommendations": true })),
                &CancellationToken::new(),
            )
            .await;

        let Response::Success {
            results: ResponseResult::NotebookDiagnostic(result),
        } = response
        else {
            panic!("expected notebook diagnostic result")
        };
        assert_eq!(result.diagnostic_status, "Healthy");
        assert_eq!(result.recommendations().len(), 3);
    }

    #[tokio::test]
    async fn concurrent_commands_keep_separate_outcomes() {
        // Given
        let transport = ScriptedTransport::new()
            .with(
                "workspaces/ws1",
                Step::body(r#"{"id":"ws1","name":"Sales","state":"Active","capacityId":"cap1"}"#),
            )
            .with("workspaces/ws1/items/p1", Step::status(500))
            .with("workspaces/ws1/items/p1", Step::status(500))
            .with("workspaces/ws1/items/p1", Step::status(500));
        let executor = executor(&transport);
        let cancellation = CancellationToken::new();

        // When
        let (health, optimize) = tokio::join!(
            executor.execute("workspace health", options(json!({ "workspace-id": "ws1" })), &cancellation),
            executor.execute(
                "pipeline optimize",
                options(json!({ "workspace-id": "ws1", "pipeline-id": "p1" })),
                &cancellation
            ),
        );

        // Then
        let Response::Success {
            results: ResponseResult::WorkspaceHealth(result),
        } = health
        else {
            panic!("expected workspace health result")
        };
        assert_eq!(result.workspace_id, "ws1");
        assert!(matches!(
            optimize,
            Response::Error {
                kind: ErrorKind::Execution,
                ..
            }
        ));

        let calls = transport.calls();
        assert_eq!(calls.iter().filter(|x| x.path == "workspaces/ws1").count(), 1);
        assert_eq!(calls.iter().filter(|x| x.path == "workspaces/ws1/items/p1").count(), 3);
    }
}
