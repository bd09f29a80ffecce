mod commands;
mod language;
mod ops;
mod reports;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Cli;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set. Otherwise warnings only, and each `-v` raises
/// the level: info (phases and rebuilds), debug (every spawned command),
/// trace (tool lookups, with file and line).
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,prober=info,prober_codegen=info,prober_codegen_cpp=info,prober_codegen_go=info,prober_codegen_python=info".to_string(),
            2 => "info,prober=debug,prober_codegen=debug,prober_codegen_cpp=debug,prober_codegen_go=debug,prober_codegen_python=debug,prober_config=debug".to_string(),
            _ => "debug,prober=trace,prober_codegen=trace,prober_codegen_cpp=trace,prober_codegen_go=trace,prober_codegen_python=trace,prober_config=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run()
}
