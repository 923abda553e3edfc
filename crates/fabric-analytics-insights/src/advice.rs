pub const DEFAULT_OPTIMIZATION_SCORE: &str = "Good";
pub const DEFAULT_DIAGNOSTIC_STATUS: &str = "Healthy";

pub const DEFAULT_PIPELINE_RECOMMENDATIONS: [&str; 3] = [
    "Consider enabling parallel execution for independent activities",
    "Review activity timeout settings",
    "Implement error handling and retry policies",
];

pub const DEFAULT_NOTEBOOK_RECOMMENDATIONS: [&str; 3] = [
    "Use cached data sources when appropriate",
    "Optimize spark configuration for workload",
    "Consider breaking large notebooks into smaller ones",
];

/// Labels and advisory texts attached to pipeline and notebook results. These are not
/// computed from the fetched item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advice {
    pub optimization_score: String,
    pub diagnostic_status: String,

    pub pipeline_recommendations: Vec<String>,
    pub notebook_recommendations: Vec<String>,
}

impl Default for Advice {
    fn default() -> Self {
        Self {
            optimization_score: DEFAULT_OPTIMIZATION_SCORE.to_string(),
            diagnostic_status: DEFAULT_DIAGNOSTIC_STATUS.to_string(),

            pipeline_recommendations: DEFAULT_PIPELINE_RECOMMENDATIONS.iter().map(|x| x.to_string()).collect(),
            notebook_recommendations: DEFAULT_NOTEBOOK_RECOMMENDATIONS.iter().map(|x| x.to_string()).collect(),
        }
    }
}
