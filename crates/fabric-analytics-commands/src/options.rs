//! Options accepted by the analytics commands. Raw options are keyed by their long name.

use serde::Deserialize;

use crate::command::OptionDefinition;

pub const WORKSPACE_ID: OptionDefinition = OptionDefinition {
    name: "workspace-id",
    short: 'w',
    description: "The Fabric workspace ID",
    required: true,
};

pub const PIPELINE_ID: OptionDefinition = OptionDefinition {
    name: "pipeline-id",
    short: 'p',
    description: "The Fabric pipeline ID",
    required: true,
};

pub const NOTEBOOK_ID: OptionDefinition = OptionDefinition {
    name: "notebook-id",
    short: 'n',
    description: "The Fabric notebook ID",
    required: true,
};

pub const INCLUDE_METRICS: OptionDefinition = OptionDefinition {
    name: "include-metrics",
    short: 'm',
    description: "Include detailed metrics in the analysis",
    required: false,
};

pub const INCLUDE_RECOMMENDATIONS: OptionDefinition = OptionDefinition {
    name: "include-recommendations",
    short: 'r',
    description: "Include optimization recommendations",
    required: false,
};

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct HealthOptions {
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub include_metrics: bool,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct OptimizeOptions {
    pub workspace_id: Option<String>,
    pub pipeline_id: Option<String>,
    #[serde(default)]
    pub include_recommendations: bool,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DiagnoseOptions {
    pub workspace_id: Option<String>,
    pub notebook_id: Option<String>,
    #[serde(default)]
    pub include_recommendations: bool,
}
