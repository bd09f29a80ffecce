use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use prober_core::{LanguageChoice, LanguageSelection};

use super::{UnwrapOrExit, absolute, load_config};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Schema file whose generated clients should be removed
    #[arg(short, long)]
    pub proto: PathBuf,

    /// Client languages to remove (all, cpp, go, python)
    #[arg(short, long, num_args = 1.., default_value = "all")]
    pub language: Vec<LanguageChoice>,

    /// Output root holding the <name>_<lang> directories [default: generated]
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

impl CleanCommand {
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let config = load_config(config)?;
        let output_dir = self.directory.as_deref().map(absolute).transpose()?;
        let languages = LanguageSelection::from_choices(&self.language);

        let report = ops::clean(
            config,
            ops::clean::CleanOptions {
                schema: &self.proto,
                languages: &languages,
                output_dir: output_dir.as_deref(),
            },
        )
        .unwrap_or_exit();

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
