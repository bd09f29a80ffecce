//! Generate command report rendering.

use prober_codegen::{GenerateReport, RebuildOutcome};

use super::{
    describe,
    output::{Output, Report},
};

/// Render the rebuild line shared by `generate` and `test`.
pub(super) fn render_rebuild(out: &mut dyn Output, rebuild: Option<&RebuildOutcome>) {
    match rebuild {
        None => out.key_value("Rebuild", "skipped"),
        Some(RebuildOutcome::Succeeded) => out.key_value("Rebuild", "ok"),
        Some(RebuildOutcome::Failed(err)) => {
            out.key_value("Rebuild", "failed, using existing generators");
            out.warning(&describe(err));
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value(
            "Schema",
            &format!("{} ({})", self.schema.display(), self.unique_name),
        );
        render_rebuild(out, self.rebuild.as_ref());
        out.newline();

        out.section("Clients");
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(()) => out.added_item(&format!(
                    "{:<7} {}",
                    outcome.language.as_str(),
                    outcome.output_dir.display()
                )),
                Err(err) => out.failed_item(&format!(
                    "{:<7} {}",
                    outcome.language.as_str(),
                    describe(err)
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use prober_codegen::LanguageOutcome;
    use prober_core::{Error, Language, UniqueName};

    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_render_mixed_outcomes() {
        let report = GenerateReport {
            schema: PathBuf::from("/repo/protos/echo.proto"),
            unique_name: UniqueName::from_schema_path(Path::new("echo.proto")).unwrap(),
            rebuild: Some(RebuildOutcome::Failed(Box::new(Error::ToolInvocation {
                tool: "bazel".to_string(),
                code: Some(1),
                command: "bazel build :all".to_string(),
            }))),
            outcomes: vec![
                LanguageOutcome {
                    language: Language::Cpp,
                    output_dir: PathBuf::from("/repo/generated/echo_cpp"),
                    result: Ok(()),
                },
                LanguageOutcome {
                    language: Language::Go,
                    output_dir: PathBuf::from("/repo/generated/echo_go"),
                    result: Err(Error::missing_tool("protoc-gen-go")),
                },
            ],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.text(),
            "Schema: /repo/protos/echo.proto (echo)\n\
             Rebuild: failed, using existing generators\n\
             warning: 'bazel' failed (exit code 1)\n\
             \n\
             Clients:\n  \
             + cpp     /repo/generated/echo_cpp\n  \
             ! go      required tool 'protoc-gen-go' was not found on PATH"
        );
    }
}
