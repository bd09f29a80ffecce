//! Batch generation and build checks over schema fixtures.

use std::{
    fs,
    path::{Path, PathBuf},
};

use prober_core::{Error, LanguageSelection, Result, SCHEMA_EXTENSION, UniqueName};
use tracing::{info, info_span};

use super::{Pipeline, TestReport};

/// Regenerates clients for every schema in a fixture directory and checks
/// that each one builds.
///
/// Runs strictly sequentially and stops at the first failure.
pub struct TestDriver {
    pipeline: Pipeline,
}

impl TestDriver {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Schema files in `dir`, sorted by name. Other entries are skipped.
    pub fn schemas(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| Error::filesystem(dir, e))?;

        let mut schemas = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::filesystem(dir, e))?.path();
            let is_schema = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| {
                    name.len() > SCHEMA_EXTENSION.len() && name.ends_with(SCHEMA_EXTENSION)
                });
            if is_schema && path.is_file() {
                schemas.push(path);
            }
        }
        schemas.sort();
        Ok(schemas)
    }

    /// Generate and build every fixture in `fixtures` for `languages`.
    ///
    /// Errors that prevent the batch from starting (missing tools, an
    /// unreadable fixture directory, a strict rebuild failure) are returned
    /// as `Err`. A failure while processing a schema halts the batch and is
    /// recorded in [`TestReport::failure`].
    pub fn run_all(&self, fixtures: &Path, languages: &LanguageSelection) -> Result<TestReport> {
        self.pipeline.preflight()?;
        let schemas = Self::schemas(fixtures)?;

        let mut report = TestReport {
            rebuild: Some(self.pipeline.rebuild(languages)?),
            ..Default::default()
        };

        for schema in schemas {
            let unique_name = UniqueName::from_schema_path(&schema)?;
            let _span = info_span!("test", schema = %unique_name).entered();
            report.schemas.push(unique_name.clone());

            if let Err(failure) = self.run_one(&schema, &unique_name, languages, &mut report) {
                report.failure = Some(failure);
                break;
            }
        }

        Ok(report)
    }

    fn run_one(
        &self,
        schema: &Path,
        unique_name: &UniqueName,
        languages: &LanguageSelection,
        report: &mut TestReport,
    ) -> Result<()> {
        let generated = self.pipeline.generate(schema, languages, false)?;
        if let Some(failure) = generated.into_first_failure() {
            return Err(failure);
        }

        for language in languages.iter() {
            let Some(plugin) = self.pipeline.plugin_for(language) else {
                continue;
            };
            let ctx = self.pipeline.context(unique_name, language);
            plugin.try_build(&ctx).map_err(|source| {
                Box::new(Error::TestFailure {
                    language,
                    unique_name: unique_name.to_string(),
                    source,
                })
            })?;
            info!(%language, "client builds");
            report.passed.push((unique_name.clone(), language));
        }
        Ok(())
    }
}
