//! Test operation - generate and build every fixture schema.

use prober_codegen::{TestDriver, TestReport};
use prober_config::{Config, RebuildPolicy};
use prober_core::{LanguageSelection, Result};

/// Execute the test operation.
///
/// Generates into `paths.test_output` and reads schemas from `paths.fixtures`.
pub fn test(
    config: Config,
    languages: &LanguageSelection,
    rebuild_policy: Option<RebuildPolicy>,
) -> Result<TestReport> {
    let fixtures = config.fixtures_dir();
    let output = config.test_output_root();
    let pipeline = super::pipeline(config.with_output(output), languages, rebuild_policy);

    TestDriver::new(pipeline).run_all(&fixtures, languages)
}

#[cfg(all(test, unix))]
mod tests {
    use prober_codegen::testing::Sandbox;
    use prober_core::{Error, Language};

    use super::*;

    #[test]
    fn test_every_fixture_builds() {
        let sandbox = Sandbox::ready();
        sandbox.schema("echo.proto");
        sandbox.schema("kvstore.proto");

        let report = test(sandbox.config(), &LanguageSelection::all(), None).unwrap();

        assert!(report.is_success());
        assert_eq!(report.passed.len(), 6);
        assert!(sandbox.root().join("tmp/kvstore_python").is_dir());
        assert_eq!(
            sandbox.calls_to("bazel"),
            [
                "build :all",
                "build :generated_echo_prober",
                "build :generated_kvstore_prober",
            ]
        );
        assert_eq!(
            sandbox.calls_to("go"),
            [
                "build echo.grpc.client.pb.go",
                "build kvstore.grpc.client.pb.go",
            ]
        );
    }

    #[test]
    fn test_first_build_failure_halts() {
        let sandbox = Sandbox::ready();
        sandbox.schema("echo.proto");
        sandbox.schema("kvstore.proto");
        sandbox.fake_tool("go", "exit 1");

        let report = test(sandbox.config(), &LanguageSelection::all(), None).unwrap();

        assert_eq!(report.passed.len(), 1);
        assert_eq!(report.passed[0].1, Language::Cpp);
        let failure = report.failure.unwrap();
        assert!(matches!(*failure, Error::TestFailure { language: Language::Go, .. }));
        assert!(!sandbox.root().join("tmp/kvstore_cpp").exists());
        assert!(sandbox.calls_to("python3").is_empty());
    }
}
