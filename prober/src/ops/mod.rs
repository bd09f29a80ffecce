//! Core operations.
//!
//! This module contains the business logic for prober commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod clean;
pub mod generate;
pub mod test;

pub use check::check;
pub use clean::clean;
pub use generate::generate;
pub use test::test;

use prober_codegen::Pipeline;
use prober_config::{Config, RebuildPolicy};
use prober_core::LanguageSelection;

use crate::language::LanguageSupport;

/// A pipeline with a plugin for every selected language.
fn pipeline(
    config: Config,
    languages: &LanguageSelection,
    rebuild_policy: Option<RebuildPolicy>,
) -> Pipeline {
    let pipeline = Pipeline::new(config).with_plugins(LanguageSupport::plugins(languages));
    match rebuild_policy {
        Some(policy) => pipeline.rebuild_policy(policy),
        None => pipeline,
    }
}
