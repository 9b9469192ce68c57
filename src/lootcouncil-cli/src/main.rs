mod cli;
mod commands;
mod config;
mod fetch;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "lootcouncil=debug,lootcouncil_reports=debug,lootcouncil_cli=debug"
    } else {
        "lootcouncil=info,lootcouncil_reports=info,lootcouncil_cli=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run {
            sim_list,
            content,
            output_dir,
            sheet_url,
        } => {
            commands::run::handle(&sim_list, content, output_dir, sheet_url)?;
        }

        Commands::Resolve { name, key, content } => {
            commands::resolve::handle(&name, key.as_deref(), content)?;
        }

        Commands::Configure {
            content,
            output_dir,
            sheet_url,
            show,
        } => {
            commands::configure::handle(content, output_dir, sheet_url, show)?;
        }
    }

    Ok(())
}
