// src/cli/mod.rs
//! CLI definitions for cookbook
//!
//! Command implementations live in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(author = "Cookbook Contributors")]
#[command(version)]
#[command(about = "Package recipe records and their install procedures", long_about = None)]
pub struct Cli {
    /// Directory of additional *.toml recipes
    #[arg(long, global = true, value_name = "DIR")]
    pub recipes: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered recipes
    List,

    /// Show recipe metadata and known versions
    Info {
        /// Package name
        name: String,
    },

    /// Print the archive URL for a version
    Url {
        /// Package name
        name: String,

        /// Version (default: newest)
        version: Option<String>,
    },

    /// Configure, build and install a package from an unpacked source tree
    Install {
        /// Package spec: name or name@version
        spec: String,

        /// Unpacked source directory
        #[arg(short, long, value_name = "DIR")]
        source_dir: Option<PathBuf>,

        /// Explicit install prefix
        #[arg(short, long, value_name = "PATH")]
        prefix: Option<PathBuf>,

        /// Install root; prefix becomes <root>/<name>/<version>
        #[arg(short, long, default_value = "/opt")]
        root: PathBuf,

        /// Parallel jobs for the build step (default: available CPUs)
        #[arg(short, long)]
        jobs: Option<u32>,

        /// Make program
        #[arg(long, default_value = "make")]
        make: String,

        /// Print the steps without running them
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_install() {
        let cli = Cli::try_parse_from([
            "cookbook",
            "install",
            "libelf@0.8.12",
            "--dry-run",
            "-j",
            "8",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Install {
                spec,
                dry_run,
                jobs,
                root,
                ..
            }) => {
                assert_eq!(spec, "libelf@0.8.12");
                assert!(dry_run);
                assert_eq!(jobs, Some(8));
                assert_eq!(root, PathBuf::from("/opt"));
            }
            _ => panic!("expected install"),
        }
    }
}
