//! Clean command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from removing a schema's generated clients.
#[derive(Debug)]
pub struct CleanReport {
    /// Unique name of the schema.
    pub unique_name: String,
    /// Output directories that were removed.
    pub removed: Vec<PathBuf>,
    /// Shared bindings directory, if it was removed.
    pub removed_bindings: Option<PathBuf>,
}

impl CleanReport {
    pub fn has_removals(&self) -> bool {
        !self.removed.is_empty() || self.removed_bindings.is_some()
    }
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if !self.has_removals() {
            out.preformatted(&format!("Nothing to clean for {}.", self.unique_name));
            return;
        }

        out.section("Deleted");
        for dir in self.removed.iter().chain(&self.removed_bindings) {
            out.removed_item(&dir.display().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_render_nothing() {
        let report = CleanReport {
            unique_name: "echo".to_string(),
            removed: Vec::new(),
            removed_bindings: None,
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.text(), "Nothing to clean for echo.");
    }

    #[test]
    fn test_render_removed() {
        let report = CleanReport {
            unique_name: "echo".to_string(),
            removed: vec![PathBuf::from("/repo/generated/echo_go")],
            removed_bindings: Some(PathBuf::from("/repo/generated_go_pb_files/echo")),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.text(),
            "Deleted:\n  - /repo/generated/echo_go\n  - /repo/generated_go_pb_files/echo"
        );
    }
}
