use std::path::Path;

use clap::Args;
use eyre::Result;
use prober_core::{LanguageChoice, LanguageSelection};

use super::load_config;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Client languages to check (all, cpp, go, python)
    #[arg(short, long, num_args = 1.., default_value = "all")]
    pub language: Vec<LanguageChoice>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let config = load_config(config)?;
        let languages = LanguageSelection::from_choices(&self.language);

        let report = ops::check(&config, &languages);
        report.render(&mut TerminalOutput::new());

        if !report.is_ready() {
            std::process::exit(1);
        }
        Ok(())
    }
}
