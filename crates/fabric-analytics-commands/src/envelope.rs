//! Envelope returned by every command execution. Failures are folded into the envelope
//! here and only here, callers never see a raw [`Error`].

use std::error::Error as StdError;

use fabric_analytics_common::enum_dispatch;
use fabric_analytics_insights::result::{NotebookDiagnosticResult, PipelineOptimizationResult, WorkspaceHealthResult};
use serde::Serialize;

use crate::Error;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "schema", content = "value")]
pub enum ResponseResult {
    #[serde(rename = "WorkspaceHealthResult")]
    WorkspaceHealth(WorkspaceHealthResult),

    #[serde(rename = "PipelineOptimizationResult")]
    PipelineOptimization(PipelineOptimizationResult),

    #[serde(rename = "NotebookDiagnosticResult")]
    NotebookDiagnostic(NotebookDiagnosticResult),
}

impl ResponseResult {
    pub fn schema(&self) -> &'static str {
        enum_dispatch!(self {
            Self::WorkspaceHealth(_) => "WorkspaceHealthResult",
            Self::PipelineOptimization(_) => "PipelineOptimizationResult",
            Self::NotebookDiagnostic(_) => "NotebookDiagnosticResult"
        })
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Execution,
    Cancelled,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Success {
        results: ResponseResult,
    },
    Error {
        kind: ErrorKind,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        cause: Option<String>,
    },
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Error> for Response {
    fn from(error: Error) -> Self {
        Self::Error {
            kind: error.kind(),
            message: error.to_string(),
            cause: root_cause(&error),
        }
    }
}

impl From<Result<ResponseResult, Error>> for Response {
    fn from(result: Result<ResponseResult, Error>) -> Self {
        match result {
            Ok(results) => Self::Success { results },
            Err(e) => e.into(),
        }
    }
}

/// Innermost error of the source chain, if the error has any source at all
fn root_cause(error: &(dyn StdError + 'static)) -> Option<String> {
    let mut cause = error.source()?;
    while let Some(next) = cause.source() {
        cause = next;
    }

    Some(cause.to_string())
}
