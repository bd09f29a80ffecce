//! Build descriptor templates.

use std::path::{Path, PathBuf};

use prober_core::{Error, File, Result, UniqueName};
use tracing::debug;

/// The one placeholder a build descriptor template may contain.
pub const UNIQUE_NAME_PLACEHOLDER: &str = "{uniquename}";

/// Loads build descriptor templates from a directory and fills in the
/// schema's unique name.
///
/// Templates are addressed by their path relative to the template directory,
/// e.g. `go/BUILD.pb.template`.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    dir: PathBuf,
}

impl TemplateRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of a template.
    pub fn path(&self, template: &str) -> PathBuf {
        self.dir.join(template)
    }

    /// Load and render a template.
    pub fn render(&self, template: &str, unique_name: &UniqueName) -> Result<String> {
        let path = self.path(template);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::template(&path, format!("could not be read: {}", e))
        })?;
        render_str(&path, &content, unique_name)
    }

    /// Render a template and write it to `dest`.
    pub fn write(&self, template: &str, unique_name: &UniqueName, dest: &Path) -> Result<()> {
        let content = self.render(template, unique_name)?;
        debug!(template, dest = %dest.display(), "writing build descriptor");
        File::new(dest, content).write()
    }
}

/// Substitute every occurrence of the placeholder.
///
/// A template without the placeholder is rejected: a descriptor that does not
/// mention the schema cannot build its artifacts.
pub fn render_str(path: &Path, content: &str, unique_name: &UniqueName) -> Result<String> {
    if !content.contains(UNIQUE_NAME_PLACEHOLDER) {
        return Err(Error::template(
            path,
            format!("missing the {} placeholder", UNIQUE_NAME_PLACEHOLDER),
        ));
    }
    Ok(content.replace(UNIQUE_NAME_PLACEHOLDER, unique_name.as_str()))
}
