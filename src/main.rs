// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let registry = commands::load_registry(cli.recipes.as_deref())?;

    match cli.command {
        Some(Commands::List) => commands::cmd_list(&registry),
        Some(Commands::Info { name }) => commands::cmd_info(&registry, &name),
        Some(Commands::Url { name, version }) => {
            commands::cmd_url(&registry, &name, version.as_deref())
        }
        Some(Commands::Install {
            spec,
            source_dir,
            prefix,
            root,
            jobs,
            make,
            dry_run,
        }) => commands::cmd_install(
            registry,
            commands::InstallOptions {
                spec,
                source_dir,
                prefix,
                root,
                jobs,
                make,
                dry_run,
            },
        ),
        None => {
            println!("cookbook v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'cookbook --help' for usage information");
            Ok(())
        }
    }
}
