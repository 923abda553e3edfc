use std::env;

use fabric_analytics_commands::{CommandExecutor, Context as CommandContext};

use crate::core::context::configuration::Configuration;
use crate::core::Error;

pub mod configuration;

#[derive(Clone, Debug)]
pub struct Context {
    pub configuration: Configuration,
}

impl Context {
    pub fn new(configuration: Configuration) -> Self {
        Self { configuration }
    }

    /// Reads `FABRIC_` variables from the process environment, a `.env` file in the working
    /// directory being loaded first when present
    pub fn load() -> Result<Self, Error> {
        dotenvy::dotenv().ok();

        Configuration::from_variables(env::vars()).map(Self::new)
    }

    pub fn executor(&self) -> Result<CommandExecutor, Error> {
        let configuration = self.configuration.client()?;
        let context = CommandContext::from_configuration(&configuration)?;

        Ok(CommandExecutor::new(context))
    }
}
