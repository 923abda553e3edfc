use fabric_analytics_client::{Client, Configuration};
use fabric_analytics_insights::Orchestrator;

/// Services shared by every command execution
#[derive(Clone)]
pub struct Context {
    pub orchestrator: Orchestrator,
}

impl Context {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn from_configuration(configuration: &Configuration) -> Result<Self, fabric_analytics_client::Error> {
        let client = Client::new(configuration)?;

        Ok(Self::new(Orchestrator::new(client)))
    }
}
