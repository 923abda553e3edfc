use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fabric_analytics_client::CancellationToken;
use fabric_analytics_commands::analytics;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

mod command;
pub mod core;

use crate::command::{invoke, DiagnoseParameters, HealthParameters, OptimizeParameters};
use crate::core::context::Context;
use crate::core::{Error, Fmt};

#[derive(Parser)]
#[command(name = "fabric-analytics", about = "Health, optimization and diagnostic analysis for Microsoft Fabric")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand, about = "Workspace operations")]
    Workspace(WorkspaceCommands),

    #[command(subcommand, about = "Data pipeline operations")]
    Pipeline(PipelineCommands),

    #[command(subcommand, about = "Notebook operations")]
    Notebook(NotebookCommands),

    #[command(about = "List every available command with its metadata")]
    Tools,
}

#[derive(Subcommand)]
enum WorkspaceCommands {
    #[command(about = "Analyze the health status of a workspace")]
    Health(HealthParameters),
}

#[derive(Subcommand)]
enum PipelineCommands {
    #[command(about = "Analyze and optimize a data pipeline")]
    Optimize(OptimizeParameters),
}

#[derive(Subcommand)]
enum NotebookCommands {
    #[command(about = "Diagnose issues in a notebook")]
    Diagnose(DiagnoseParameters),
}

#[tokio::main]
async fn main() -> Result<ExitCode, Error> {
    let cli = Cli::parse();
    let context = Context::load()?;

    let subscriber = Registry::default().with(Fmt::layer(&context.configuration.verbosity));
    tracing::subscriber::set_global_default(subscriber).map_err(|e| Error::Tracing(e.to_string()))?;

    let cancellation = cancel_on_interrupt();
    let response = match cli.command {
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&analytics().describe())?);
            return Ok(ExitCode::SUCCESS);
        },
        Commands::Workspace(WorkspaceCommands::Health(parameters)) => invoke(&context.executor()?, &parameters, &cancellation).await?,
        Commands::Pipeline(PipelineCommands::Optimize(parameters)) => invoke(&context.executor()?, &parameters, &cancellation).await?,
        Commands::Notebook(NotebookCommands::Diagnose(parameters)) => invoke(&context.executor()?, &parameters, &cancellation).await?,
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if response.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn cancel_on_interrupt() -> CancellationToken {
    let cancellation = CancellationToken::new();

    let token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, cancelling");
            token.cancel();
        }
    });

    cancellation
}
