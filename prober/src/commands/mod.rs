mod check;
mod clean;
mod completions;
mod generate;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::{Context, Result};
use generate::GenerateCommand;
use prober_config::{Config, ProberToml};
use test::TestCommand;

/// Extension trait for exiting on prober errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for prober_core::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(e),
        }
    }
}

/// Print an error as a diagnostic and exit with status 1.
pub(crate) fn exit_with(error: Box<prober_core::Error>) -> ! {
    eprintln!("{:?}", miette::Report::new(*error));
    std::process::exit(1);
}

/// Load prober.toml from `--config`, the current directory, or defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir().wrap_err("Failed to read the current directory")?;
    Ok(ProberToml::discover(explicit, &cwd).unwrap_or_exit())
}

/// Resolve a path given on the command line against the current directory.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).wrap_err_with(|| format!("Failed to resolve {}", path.display()))
}

#[derive(Parser)]
#[command(name = "prober")]
#[command(version)]
#[command(about = "Generate runnable gRPC prober clients from .proto files")]
pub(crate) struct Cli {
    /// Path to prober.toml (defaults to ./prober.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let config = self.config.as_deref();
        match &self.command {
            Commands::Generate(cmd) => cmd.run(config),
            Commands::Test(cmd) => cmd.run(config),
            Commands::Check(cmd) => cmd.run(config),
            Commands::Clean(cmd) => cmd.run(config),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate prober clients for a .proto file
    Generate(GenerateCommand),

    /// Regenerate and build clients for every fixture schema
    Test(TestCommand),

    /// Check that the required tools and templates are available
    Check(CheckCommand),

    /// Remove generated clients and shared bindings for a .proto file
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
