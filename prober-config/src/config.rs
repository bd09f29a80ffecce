use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::RebuildConfig;

/// Root of prober.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// External executables
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Generator plugin rebuild behaviour
    #[serde(default)]
    pub rebuild: RebuildConfig,
}

/// `[paths]` section. Relative entries resolve against `root`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PathsConfig {
    /// Repository root; the build tool runs here.
    pub root: PathBuf,
    /// Where `generate` writes `<name>_<lang>` directories.
    pub output: PathBuf,
    /// Build descriptor templates, one subdirectory per language.
    pub templates: PathBuf,
    /// Where the build tool leaves the client generator plugins.
    pub plugins: PathBuf,
    /// Shared Go bindings tree. Defaults to `generated_go_pb_files` next to
    /// the output root.
    pub bindings: Option<PathBuf>,
    /// Schema fixtures used by `prober test`.
    pub fixtures: PathBuf,
    /// Output root used by `prober test`.
    pub test_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from("generated"),
            templates: PathBuf::from("templates"),
            plugins: PathBuf::from("bazel-bin"),
            bindings: None,
            fixtures: PathBuf::from("protos"),
            test_output: PathBuf::from("tmp"),
        }
    }
}

/// `[tools]` section. Values are program names looked up on PATH, or paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ToolsConfig {
    pub protoc: String,
    pub build_tool: String,
    pub go: String,
    pub protoc_gen_go: String,
    pub python: String,
    pub grpc_cpp_plugin: String,
    pub grpc_python_plugin: String,
    /// Upper bound for a single external invocation; 0 waits forever.
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            protoc: "protoc".to_string(),
            build_tool: "bazel".to_string(),
            go: "go".to_string(),
            protoc_gen_go: "protoc-gen-go".to_string(),
            python: "python3".to_string(),
            grpc_cpp_plugin: "grpc_cpp_plugin".to_string(),
            grpc_python_plugin: "grpc_python_plugin".to_string(),
            timeout_secs: 600,
        }
    }
}

impl ToolsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Config {
    /// Default configuration rooted at `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.paths.root = root.into();
        config
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    pub fn output_root(&self) -> PathBuf {
        self.resolve(&self.paths.output)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(&self.paths.templates)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.resolve(&self.paths.plugins)
    }

    pub fn fixtures_dir(&self) -> PathBuf {
        self.resolve(&self.paths.fixtures)
    }

    pub fn test_output_root(&self) -> PathBuf {
        self.resolve(&self.paths.test_output)
    }

    pub fn bindings_root(&self) -> PathBuf {
        match &self.paths.bindings {
            Some(bindings) => self.resolve(bindings),
            None => {
                let output = self.output_root();
                output
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.paths.root.clone())
                    .join("generated_go_pb_files")
            }
        }
    }

    /// Point generation at a different output root (e.g. `--directory` or
    /// the test driver's scratch root). Relative paths resolve against root.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.paths.output = output.into();
        self
    }

    /// Resolve a configured program.
    ///
    /// Bare names (`protoc`) are left for PATH lookup; relative paths with a
    /// directory component (`tools/protoc`) resolve against the root.
    pub fn resolve_program(&self, program: &str) -> PathBuf {
        let path = Path::new(program);
        if path.is_relative() && path.components().count() > 1 {
            self.paths.root.join(path)
        } else {
            path.to_path_buf()
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.paths.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_against_root() {
        let config = Config::for_root("/repo");

        assert_eq!(config.output_root(), PathBuf::from("/repo/generated"));
        assert_eq!(config.templates_dir(), PathBuf::from("/repo/templates"));
        assert_eq!(config.plugins_dir(), PathBuf::from("/repo/bazel-bin"));
        assert_eq!(config.fixtures_dir(), PathBuf::from("/repo/protos"));
        assert_eq!(config.test_output_root(), PathBuf::from("/repo/tmp"));
        assert_eq!(
            config.bindings_root(),
            PathBuf::from("/repo/generated_go_pb_files")
        );
        assert_eq!(config.tools.timeout(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_bindings_follow_output_root() {
        let config = Config::for_root("/repo").with_output("/scratch/run/out");
        assert_eq!(config.output_root(), PathBuf::from("/scratch/run/out"));
        assert_eq!(
            config.bindings_root(),
            PathBuf::from("/scratch/run/generated_go_pb_files")
        );
    }

    #[test]
    fn test_explicit_bindings() {
        let mut config = Config::for_root("/repo");
        config.paths.bindings = Some(PathBuf::from("go/src/pb"));
        assert_eq!(config.bindings_root(), PathBuf::from("/repo/go/src/pb"));
    }

    #[test]
    fn test_resolve_program() {
        let config = Config::for_root("/repo");
        assert_eq!(config.resolve_program("protoc"), PathBuf::from("protoc"));
        assert_eq!(
            config.resolve_program("third_party/protoc"),
            PathBuf::from("/repo/third_party/protoc")
        );
        assert_eq!(
            config.resolve_program("/usr/bin/protoc"),
            PathBuf::from("/usr/bin/protoc")
        );
    }

    #[test]
    fn test_zero_timeout_waits_forever() {
        let mut config = Config::default();
        config.tools.timeout_secs = 0;
        assert_eq!(config.tools.timeout(), None);
    }
}
