//! taglib-gen - generate typed Java interfaces for Jelly taglibs.
//!
//! Scans resource directories for `taglib` marker files and writes one
//! interface per taglib into the output directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::generate::GenerateArgs;

/// Generate strongly-typed interfaces for Jelly taglibs.
///
/// Run `taglib-gen` in a Maven-style project to scan `src/main/resources`
/// into `target/taglib-interface`.
#[derive(Parser, Debug)]
#[command(
    name = "taglib-gen",
    author,
    version,
    about = "Generate typed Java interfaces for Jelly taglibs",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan resource roots and write taglib interfaces (default command).
    Generate(GenerateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .init();

    // Default to generate if no command given
    let command = cli.command.unwrap_or_else(|| {
        Commands::Generate(GenerateArgs {
            output: std::env::var_os("TAGLIB_GEN_OUTPUT").map(PathBuf::from),
            ..GenerateArgs::default()
        })
    });

    match command {
        Commands::Generate(args) => commands::generate::execute(args, cli.quiet)?,
    }

    Ok(())
}
