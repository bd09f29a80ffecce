//! Generate operation - clients for one schema.

use std::path::Path;

use prober_codegen::GenerateReport;
use prober_config::{Config, RebuildPolicy};
use prober_core::{LanguageSelection, Result};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Schema file to generate from.
    pub schema: &'a Path,
    /// Languages to generate.
    pub languages: &'a LanguageSelection,
    /// Output root overriding `paths.output`.
    pub output_dir: Option<&'a Path>,
    /// Whether to rebuild the client generator plugins first.
    pub rebuild: bool,
    /// Rebuild policy overriding `[rebuild] policy`.
    pub rebuild_policy: Option<RebuildPolicy>,
}

/// Execute the generate operation.
pub fn generate(config: Config, opts: GenerateOptions) -> Result<GenerateReport> {
    let config = match opts.output_dir {
        Some(dir) => config.with_output(dir),
        None => config,
    };

    super::pipeline(config, opts.languages, opts.rebuild_policy).generate(
        opts.schema,
        opts.languages,
        opts.rebuild,
    )
}
