pub mod setup;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "painel")]
#[command(about = "Painel CLI - administration for the monitoring dashboard API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the database schema and seed the demo companies and users")]
    SetupData,

    #[command(about = "Print the resolved application configuration")]
    Config,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::SetupData => setup::setup_data().await,
        Commands::Config => {
            let config = crate::config::config();
            println!("{}", serde_json::to_string_pretty(config)?);
            Ok(())
        }
    }
}
