//! Results derived from a single fetched entity. A result is built once per invocation
//! and never mutated afterwards; optional sections are `None` unless they were requested.

use serde::{Deserialize, Serialize};

use crate::advice::Advice;
use crate::model::{Notebook, Pipeline, Workspace, ACTIVE_STATE};

pub const HEALTHY: &str = "Healthy";
pub const WARNING: &str = "Warning";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WorkspaceMetrics {
    pub state: String,
    pub has_capacity: bool,
    pub issue_count: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WorkspaceHealthResult {
    pub workspace_id: String,
    pub workspace_name: String,
    pub health_status: String,
    pub issues: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<WorkspaceMetrics>,
}

impl WorkspaceHealthResult {
    pub fn from_workspace(workspace: &Workspace, include_metrics: bool) -> Self {
        let mut issues = vec![];
        if !workspace.is_active() {
            issues.push(format!("Workspace state is {}, expected {}", workspace.state, ACTIVE_STATE));
        }

        if !workspace.has_capacity() {
            issues.push("No capacity assigned to workspace".to_string());
        }

        let metrics = include_metrics.then(|| WorkspaceMetrics {
            state: workspace.state.clone(),
            has_capacity: workspace.has_capacity(),
            issue_count: issues.len(),
        });

        Self {
            workspace_id: workspace.id.clone(),
            workspace_name: workspace.name.clone(),
            health_status: if workspace.is_active() { HEALTHY } else { WARNING }.to_string(),
            issues,
            metrics,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.health_status == HEALTHY
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineOptimizationResult {
    pub pipeline_id: String,
    pub pipeline_name: String,
    pub optimization_score: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    pub performance_issues: Vec<String>,
}

impl PipelineOptimizationResult {
    pub fn from_pipeline(pipeline: &Pipeline, advice: &Advice, include_recommendations: bool) -> Self {
        Self {
            pipeline_id: pipeline.id.clone(),
            pipeline_name: pipeline.name.clone(),
            optimization_score: advice.optimization_score.clone(),
            recommendations: include_recommendations.then(|| advice.pipeline_recommendations.clone()),
            performance_issues: vec![],
        }
    }

    pub fn recommendations(&self) -> &[String] {
        self.recommendations.as_deref().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct NotebookDiagnosticResult {
    pub notebook_id: String,
    pub notebook_name: String,
    pub diagnostic_status: String,
    pub issues: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

impl NotebookDiagnosticResult {
    pub fn from_notebook(notebook: &Notebook, advice: &Advice, include_recommendations: bool) -> Self {
        Self {
            notebook_id: notebook.id.clone(),
            notebook_name: notebook.name.clone(),
            diagnostic_status: advice.diagnostic_status.clone(),
            issues: vec![],
            recommendations: include_recommendations.then(|| advice.notebook_recommendations.clone()),
        }
    }

    pub fn recommendations(&self) -> &[String] {
        self.recommendations.as_deref().unwrap_or_default()
    }
}
