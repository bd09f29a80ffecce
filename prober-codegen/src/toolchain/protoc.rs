//! Schema compiler invocations.

use std::path::{Path, PathBuf};

use super::ToolCommand;

/// Builder for a `protoc` command line.
///
/// Produces `-I <path>... --<kind>_out=<path>... [--plugin=protoc-gen-<kind>=<path>]... <schema>`.
///
/// # Example
///
/// ```ignore
/// let cmd = Protoc::new("protoc")
///     .include(".")
///     .out("grpc", ".")
///     .plugin("grpc", "/repo/bazel-bin/go_generator")
///     .schema("echo.proto")
///     .command(work_dir);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Protoc {
    program: String,
    includes: Vec<PathBuf>,
    outputs: Vec<String>,
    plugins: Vec<String>,
    schema: Option<PathBuf>,
}

impl Protoc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Add an import path (`-I <path>`).
    pub fn include(mut self, path: impl AsRef<Path>) -> Self {
        self.includes.push(path.as_ref().to_path_buf());
        self
    }

    /// Request output from a generator (`--<kind>_out=<path>`).
    pub fn out(mut self, kind: &str, path: impl AsRef<Path>) -> Self {
        self.outputs
            .push(format!("--{}_out={}", kind, path.as_ref().display()));
        self
    }

    /// Request output with generator parameters (`--<kind>_out=<params>:<path>`).
    pub fn out_with_params(mut self, kind: &str, params: &str, path: impl AsRef<Path>) -> Self {
        self.outputs.push(format!(
            "--{}_out={}:{}",
            kind,
            params,
            path.as_ref().display()
        ));
        self
    }

    /// Use an explicit plugin executable for `kind` (`--plugin=protoc-gen-<kind>=<path>`).
    pub fn plugin(mut self, kind: &str, path: impl AsRef<Path>) -> Self {
        self.plugins.push(format!(
            "--plugin=protoc-gen-{}={}",
            kind,
            path.as_ref().display()
        ));
        self
    }

    /// The schema file to compile.
    pub fn schema(mut self, schema: impl AsRef<Path>) -> Self {
        self.schema = Some(schema.as_ref().to_path_buf());
        self
    }

    /// Arguments in invocation order.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for include in &self.includes {
            args.push("-I".to_string());
            args.push(include.display().to_string());
        }
        args.extend(self.outputs.iter().cloned());
        args.extend(self.plugins.iter().cloned());
        if let Some(schema) = &self.schema {
            args.push(schema.display().to_string());
        }
        args
    }

    /// Finish the builder into a command running in `cwd`.
    pub fn command(self, cwd: impl Into<PathBuf>) -> ToolCommand {
        let args = self.args();
        ToolCommand::new(self.program, cwd).args(args)
    }
}
