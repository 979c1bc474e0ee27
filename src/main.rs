//! fnimg - build driver for the Rust function runtime images.
//!
//! Drives docker to produce the three images a function deployment needs:
//! - build image (`<ns>/rust:<version>-build`, compiler toolchain)
//! - runtime image (`<ns>/rust:<version>-rt`, minimal execution environment)
//! - init image (`<ns>/rust:init`, function bootstrap template)
#![allow(dead_code)]

mod commands;
mod config;
mod docker;
mod inventory;
mod preflight;
mod process;
mod workdir;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::Config;

#[derive(Parser)]
#[command(name = "fnimg")]
#[command(about = "Build driver for Rust function runtime images")]
#[command(
    after_help = "QUICK START:\n  fnimg preflight       Check docker and the images layout\n  fnimg build 1.45.0    Build all three images for a toolchain version\n  fnimg show versions   List versions with build contexts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the build, runtime, and init images for a toolchain version
    Build {
        /// Toolchain version to build (e.g. 1.45.0)
        version: String,
    },

    /// Run preflight checks (verify docker and the images layout)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// List toolchain versions that have build contexts
    Versions {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List locally built images for the configured namespace
    Images,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = std::env::current_dir()?;

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load(&base_dir);

    match cli.command {
        Commands::Build { version } => {
            if version.is_empty() {
                eprintln!("usage: fnimg build <version>");
                std::process::exit(2);
            }
            commands::cmd_build(&config, &version)?;
        }

        Commands::Preflight { strict } => {
            commands::cmd_preflight(&config, strict)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Versions { json } => commands::show::ShowTarget::Versions { json },
                ShowTarget::Images => commands::show::ShowTarget::Images,
            };
            commands::cmd_show(&config, show_target)?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        // Builder failures exit with the builder's own code; everything
        // else is an environment failure.
        let code = err
            .downcast_ref::<process::ExitStatusError>()
            .map(|e| e.code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
