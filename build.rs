// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: extra recipe directory
fn recipes_arg() -> Arg {
    Arg::new("recipes")
        .long("recipes")
        .value_name("DIR")
        .global(true)
        .help("Directory of additional *.toml recipes")
}

fn build_cli() -> Command {
    Command::new("cookbook")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Cookbook Contributors")
        .about("Package recipe records and their install procedures")
        .subcommand_required(false)
        .arg(recipes_arg())
        .subcommand(Command::new("list").about("List registered recipes"))
        .subcommand(
            Command::new("info")
                .about("Show recipe metadata and known versions")
                .arg(Arg::new("name").required(true).help("Package name")),
        )
        .subcommand(
            Command::new("url")
                .about("Print the archive URL for a version")
                .arg(Arg::new("name").required(true).help("Package name"))
                .arg(Arg::new("version").help("Version (default: newest)")),
        )
        .subcommand(
            Command::new("install")
                .about("Configure, build and install a package from an unpacked source tree")
                .arg(
                    Arg::new("spec")
                        .required(true)
                        .help("Package spec: name or name@version"),
                )
                .arg(
                    Arg::new("source_dir")
                        .short('s')
                        .long("source-dir")
                        .value_name("DIR")
                        .help("Unpacked source directory"),
                )
                .arg(
                    Arg::new("prefix")
                        .short('p')
                        .long("prefix")
                        .value_name("PATH")
                        .help("Explicit install prefix"),
                )
                .arg(
                    Arg::new("root")
                        .short('r')
                        .long("root")
                        .default_value("/opt")
                        .help("Install root; prefix becomes <root>/<name>/<version>"),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Parallel jobs for the build step"),
                )
                .arg(
                    Arg::new("make")
                        .long("make")
                        .default_value("make")
                        .help("Make program"),
                )
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(clap::ArgAction::SetTrue)
                        .help("Print the steps without running them"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("cookbook.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
