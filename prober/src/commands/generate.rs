use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use prober_config::RebuildPolicy;
use prober_core::{LanguageChoice, LanguageSelection};

use super::{UnwrapOrExit, absolute, exit_with, load_config};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Client languages to generate (all, cpp, go, python)
    #[arg(short, long, num_args = 1.., default_value = "all")]
    pub language: Vec<LanguageChoice>,

    /// Schema file to generate clients for
    #[arg(short, long)]
    pub proto: PathBuf,

    /// Output root for the <name>_<lang> directories [default: generated]
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Skip rebuilding the client generator plugins
    #[arg(long)]
    pub no_rebuild: bool,

    /// What a failed plugin rebuild does (overrides prober.toml)
    #[arg(long, value_name = "strict|best-effort")]
    pub rebuild_policy: Option<RebuildPolicy>,
}

impl GenerateCommand {
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let config = load_config(config)?;
        let output_dir = self.directory.as_deref().map(absolute).transpose()?;
        let languages = LanguageSelection::from_choices(&self.language);

        let report = ops::generate(
            config,
            ops::generate::GenerateOptions {
                schema: &self.proto,
                languages: &languages,
                output_dir: output_dir.as_deref(),
                rebuild: !self.no_rebuild,
                rebuild_policy: self.rebuild_policy,
            },
        )
        .unwrap_or_exit();

        report.render(&mut TerminalOutput::new());

        let mut failures = report.into_failures();
        let last = failures.pop();
        for failure in failures {
            eprintln!("{:?}", miette::Report::new(*failure));
        }
        match last {
            Some(failure) => exit_with(failure),
            None => Ok(()),
        }
    }
}
