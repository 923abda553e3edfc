use clap::Args;
use fabric_analytics_client::CancellationToken;
use fabric_analytics_commands::{CommandExecutor, RawOptions, Response};
use serde::Serialize;
use serde_json::Value;

use crate::core::Error;

/// Command line parameters forwarded to the executor. Identifiers stay optional here so that
/// missing ones are reported by command validation rather than by the argument parser.
pub trait Invocation: Serialize {
    const PATH: &'static str;

    fn options(&self) -> Result<RawOptions, Error> {
        match serde_json::to_value(self)? {
            Value::Object(options) => Ok(options),
            _ => Ok(RawOptions::new()),
        }
    }
}

pub async fn invoke<I: Invocation>(executor: &CommandExecutor, parameters: &I, cancellation: &CancellationToken) -> Result<Response, Error> {
    let options = parameters.options()?;

    Ok(executor.execute(I::PATH, options, cancellation).await)
}

#[derive(Args, Serialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct HealthParameters {
    #[arg(short = 'w', long, help = "The Fabric workspace ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,

    #[arg(short = 'm', long, help = "Include detailed metrics in the analysis")]
    pub include_metrics: bool,
}

impl Invocation for HealthParameters {
    const PATH: &'static str = "workspace health";
}

#[derive(Args, Serialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct OptimizeParameters {
    #[arg(short = 'w', long, help = "The Fabric workspace ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,

    #[arg(short = 'p', long, help = "The Fabric pipeline ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,

    #[arg(short = 'r', long, help = "Include optimization recommendations")]
    pub include_recommendations: bool,
}

impl Invocation for OptimizeParameters {
    const PATH: &'static str = "pipeline optimize";
}

#[derive(Args, Serialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DiagnoseParameters {
    #[arg(short = 'w', long, help = "The Fabric workspace ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,

    #[arg(short = 'n', long, help = "The Fabric notebook ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notebook_id: Option<String>,

    #[arg(short = 'r', long, help = "Include optimization recommendations")]
    pub include_recommendations: bool,
}

impl Invocation for DiagnoseParameters {
    const PATH: &'static str = "notebook diagnose";
}

#[cfg(test)]
mod tests {
    use fabric_analytics_commands::analytics;
    use serde_json::json;

    use super::*;

    #[test]
    fn options_use_long_option_names() {
        let parameters = OptimizeParameters {
            workspace_id: Some("ws1".to_string()),
            pipeline_id: Some("p1".to_string()),
            include_recommendations: true,
        };

        let options = parameters.options().unwrap();

        assert_eq!(
            Value::Object(options),
            json!({ "workspace-id": "ws1", "pipeline-id": "p1", "include-recommendations": true })
        );
    }

    #[test]
    fn absent_identifiers_are_left_out() {
        let parameters = HealthParameters {
            workspace_id: None,
            include_metrics: false,
        };

        assert_eq!(Value::Object(parameters.options().unwrap()), json!({ "include-metrics": false }));
    }

    #[test]
    fn every_invocation_path_is_registered() {
        let commands = analytics();

        for path in [HealthParameters::PATH, OptimizeParameters::PATH, DiagnoseParameters::PATH] {
            assert!(commands.find(path).is_some(), "{} is not registered", path);
        }
    }
}
