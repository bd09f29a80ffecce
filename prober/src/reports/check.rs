//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Whether a tool, template or generator resolved, and where.
#[derive(Debug)]
pub struct ResourceStatus {
    /// Configured name.
    pub name: String,
    /// Resolved path, if found.
    pub found: Option<PathBuf>,
}

impl ResourceStatus {
    pub fn is_found(&self) -> bool {
        self.found.is_some()
    }
}

/// Report data from the toolchain preflight.
#[derive(Debug)]
pub struct CheckReport {
    /// Repository root.
    pub root: PathBuf,
    /// Selected languages, comma separated.
    pub languages: String,
    /// Schema compiler, build tool and per-language tools.
    pub tools: Vec<ResourceStatus>,
    /// Build descriptor templates.
    pub templates: Vec<ResourceStatus>,
    /// Client generator plugins. Missing ones are rebuilt by `generate`.
    pub generators: Vec<ResourceStatus>,
}

impl CheckReport {
    /// Whether every tool and template resolved.
    pub fn is_ready(&self) -> bool {
        self.missing().next().is_none()
    }

    /// Missing tools, then missing templates.
    pub fn missing(&self) -> impl Iterator<Item = &ResourceStatus> {
        self.tools
            .iter()
            .chain(&self.templates)
            .filter(|s| !s.is_found())
    }

    pub fn missing_generators(&self) -> impl Iterator<Item = &ResourceStatus> {
        self.generators.iter().filter(|s| !s.is_found())
    }
}

fn render_group(out: &mut dyn Output, name: &str, items: &[ResourceStatus]) {
    out.section(name);
    for item in items {
        match &item.found {
            Some(path) => out.added_item(&format!("{} ({})", item.name, path.display())),
            None => out.failed_item(&format!("{} (not found)", item.name)),
        }
    }
    out.newline();
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Root", &self.root.display().to_string());
        out.key_value("Languages", &self.languages);
        out.newline();

        render_group(out, "Tools", &self.tools);
        render_group(out, "Templates", &self.templates);
        render_group(out, "Client generators", &self.generators);

        for generator in self.missing_generators() {
            out.warning(&format!(
                "{} is not built yet; `prober generate` rebuilds it unless --no-rebuild is given",
                generator.name
            ));
        }

        let missing = self.missing().count();
        if missing == 0 {
            out.preformatted("✓ ready to generate");
        } else {
            out.preformatted(&format!(
                "✗ {} required tool{} or template{} missing",
                missing,
                if missing == 1 { "" } else { "s" },
                if missing == 1 { "" } else { "s" }
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn status(name: &str, found: Option<&str>) -> ResourceStatus {
        ResourceStatus {
            name: name.to_string(),
            found: found.map(PathBuf::from),
        }
    }

    #[test]
    fn test_render_missing_tool() {
        let report = CheckReport {
            root: PathBuf::from("/repo"),
            languages: "go".to_string(),
            tools: vec![
                status("protoc", Some("/usr/bin/protoc")),
                status("go", None),
            ],
            templates: vec![status(
                "go/BUILD.client.template",
                Some("/repo/templates/go/BUILD.client.template"),
            )],
            generators: vec![status("go_generator", None)],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(!report.is_ready());
        let text = out.text();
        assert!(text.contains("  + protoc (/usr/bin/protoc)"));
        assert!(text.contains("  ! go (not found)"));
        assert!(text.contains("warning: go_generator is not built yet"));
        assert!(text.ends_with("✗ 1 required tool or template missing"));
    }
}
