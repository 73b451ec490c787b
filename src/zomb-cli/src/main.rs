mod cli;
mod commands;
mod config;
mod decode;
mod discovery;
mod export;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Scan {
            file,
            workshop_dir,
            output,
            format,
            split_guns_by_ammo,
        } => {
            commands::scan::handle(commands::scan::ScanOptions {
                file,
                workshop_dir,
                output,
                formats: format.unwrap_or_else(|| ExportFormat::ALL.to_vec()),
                split_guns_by_ammo,
            })?;
        }

        Commands::Parse { file } => {
            commands::parse::handle(&file)?;
        }

        Commands::Configure {
            output_dir,
            blacklist,
            clear_blacklist,
            show,
        } => {
            commands::configure::handle(output_dir, blacklist, clear_blacklist, show)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`/`-q`
fn init_tracing(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "zomb=debug,zomb_cli=debug"
    } else if quiet {
        "zomb=warn,zomb_cli=warn"
    } else {
        "zomb=info,zomb_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
