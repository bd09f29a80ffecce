//! Outcomes of pipeline runs.

use std::path::PathBuf;

use prober_core::{Error, Language, Result, UniqueName};

/// Result of rebuilding the client generator plugins.
#[derive(Debug)]
pub enum RebuildOutcome {
    Succeeded,
    /// The build tool failed but the run went on with the existing plugins.
    Failed(Box<Error>),
}

impl RebuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RebuildOutcome::Succeeded)
    }
}

/// What happened to one language of a generate run.
#[derive(Debug)]
pub struct LanguageOutcome {
    pub language: Language,
    pub output_dir: PathBuf,
    pub result: Result<()>,
}

impl LanguageOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of generating clients for one schema.
#[derive(Debug)]
pub struct GenerateReport {
    pub schema: PathBuf,
    pub unique_name: UniqueName,
    /// `None` when the rebuild was skipped.
    pub rebuild: Option<RebuildOutcome>,
    pub outcomes: Vec<LanguageOutcome>,
}

impl GenerateReport {
    /// Whether every requested language succeeded.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(LanguageOutcome::is_success)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &LanguageOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &LanguageOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Every failed language, wrapped with its language and schema.
    pub fn into_failures(self) -> Vec<Box<Error>> {
        let unique_name = self.unique_name;
        self.outcomes
            .into_iter()
            .filter_map(|outcome| {
                let source = outcome.result.err()?;
                Some(Box::new(Error::LanguageFailed {
                    language: outcome.language,
                    unique_name: unique_name.to_string(),
                    source,
                }))
            })
            .collect()
    }

    /// Take the first failed language, wrapped like [`into_failures`](Self::into_failures).
    pub fn into_first_failure(self) -> Option<Box<Error>> {
        self.into_failures().into_iter().next()
    }
}

/// Result of a test driver batch.
#[derive(Debug, Default)]
pub struct TestReport {
    /// `None` when the rebuild was skipped.
    pub rebuild: Option<RebuildOutcome>,
    /// Schemas found in the fixture directory, in processing order.
    pub schemas: Vec<UniqueName>,
    /// Clients that built, in order.
    pub passed: Vec<(UniqueName, Language)>,
    /// The failure that halted the batch.
    pub failure: Option<Box<Error>>,
}

impl TestReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_first_failure_is_wrapped() {
        let report = GenerateReport {
            schema: PathBuf::from("protos/echo.proto"),
            unique_name: UniqueName::from_schema_path(Path::new("echo.proto")).unwrap(),
            rebuild: None,
            outcomes: vec![
                LanguageOutcome {
                    language: Language::Cpp,
                    output_dir: PathBuf::from("generated/echo_cpp"),
                    result: Ok(()),
                },
                LanguageOutcome {
                    language: Language::Go,
                    output_dir: PathBuf::from("generated/echo_go"),
                    result: Err(Error::missing_tool("go")),
                },
            ],
        };

        assert!(!report.is_success());
        assert_eq!(report.succeeded().count(), 1);
        assert_eq!(report.failures().count(), 1);

        let err = report.into_first_failure().unwrap();
        assert_eq!(err.to_string(), "go generation failed for 'echo'");
        assert_eq!(err.tool(), Some("go"));
    }
}
