//! Clean operation - remove generated clients for a schema.

use std::path::Path;

use prober_codegen::{OutputLayout, SharedBindings};
use prober_config::Config;
use prober_core::{Language, LanguageSelection, Result, UniqueName};

use crate::reports::CleanReport;

/// Options for the clean operation.
pub struct CleanOptions<'a> {
    /// Schema whose outputs are removed; it does not need to exist.
    pub schema: &'a Path,
    /// Languages whose output directories are removed.
    pub languages: &'a LanguageSelection,
    /// Output root overriding `paths.output`.
    pub output_dir: Option<&'a Path>,
}

/// Execute the clean operation.
///
/// Removes `<name>_<lang>` for every selected language and, when Go is
/// selected, the schema's shared bindings.
pub fn clean(config: Config, opts: CleanOptions) -> Result<CleanReport> {
    let unique_name = UniqueName::from_schema_path(opts.schema)?;
    let config = match opts.output_dir {
        Some(dir) => config.with_output(dir),
        None => config,
    };

    let layout = OutputLayout::new(config.output_root());
    let removed = layout.clean(&unique_name, opts.languages.iter())?;

    let bindings = SharedBindings::new(config.bindings_root());
    let removed_go = opts.languages.contains(Language::Go) && bindings.remove(&unique_name)?;
    let removed_bindings = removed_go.then(|| bindings.dir_for(&unique_name));

    Ok(CleanReport {
        unique_name: unique_name.to_string(),
        removed,
        removed_bindings,
    })
}
