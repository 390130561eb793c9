mod cache;
mod cli;
mod client;
mod collection;
mod commands;
mod config;
mod error;
mod membership;
mod output;
mod paging;
mod types;
mod views;
mod workflow;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands, TeamCommands};
use client::TeamsClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = std::error::Error::source(cause);
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "cohort", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let client = TeamsClient::new(config.base_url()?, config.api_token());

            match command {
                Commands::Teams(args) => {
                    commands::teams::list(&client, &config, args).await?;
                }
                Commands::Team { action } => match action {
                    TeamCommands::Show { team, discussion } => {
                        commands::team::show(&client, &config, &team, discussion).await?;
                    }
                    TeamCommands::Leave(args) => {
                        commands::team::leave(&client, &config, args).await?;
                    }
                },
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
