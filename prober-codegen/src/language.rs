//! The per-language plugin seam.

use std::path::{Path, PathBuf};

use prober_config::{Config, ToolsConfig};
use prober_core::{Error, Language, Result, UniqueName};
use tracing::info;

use crate::{Protoc, SharedBindings, TemplateRenderer, ToolCommand, Toolchain};

/// Trait for language-specific client generation.
///
/// Implement this trait to add a target language. The pipeline calls
/// [`prework`](Self::prework) then [`generate_client`](Self::generate_client)
/// in a freshly prepared output directory; the test driver later calls
/// [`try_build`](Self::try_build) in the same directory.
pub trait LanguagePlugin {
    /// The target this plugin generates for.
    fn language(&self) -> Language;

    /// Tools this plugin needs beyond the schema compiler and build tool.
    fn required_tools<'a>(&self, _tools: &'a ToolsConfig) -> Vec<&'a str> {
        Vec::new()
    }

    /// Templates this plugin renders, relative to the template directory.
    fn templates(&self) -> &'static [&'static str];

    /// File name of the client generator plugin under the plugins directory.
    fn client_generator(&self) -> String {
        format!("{}_generator", self.language())
    }

    /// The client source file `generate_client` produces.
    fn client_file(&self, unique_name: &UniqueName) -> PathBuf;

    /// Build target of the generated prober binary.
    fn build_target(&self, unique_name: &UniqueName) -> String {
        format!(":generated_{}_prober", unique_name)
    }

    /// Render build descriptors and generate the native bindings.
    fn prework(&self, ctx: &GenerationContext<'_>) -> Result<()>;

    /// Run the client generator plugin against the schema.
    ///
    /// The default runs `protoc -I . --grpc_out=. --plugin=protoc-gen-grpc=<generator>`
    /// and checks that [`client_file`](Self::client_file) appeared.
    fn generate_client(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        let generator = ctx.client_generator(&self.client_generator())?;
        ctx.run_protoc(ctx.protoc().out("grpc", ".").plugin("grpc", &generator))?;
        ctx.expect_file(&self.client_file(ctx.unique_name()))
    }

    /// Check that the generated client builds.
    fn try_build(&self, ctx: &GenerationContext<'_>) -> Result<()>;
}

/// Everything a plugin needs to generate one (schema, language) pair.
///
/// Commands started through the context run in [`work_dir`](Self::work_dir);
/// the process-wide current directory is never changed.
pub struct GenerationContext<'a> {
    unique_name: &'a UniqueName,
    work_dir: PathBuf,
    config: &'a Config,
    toolchain: &'a Toolchain,
    templates: &'a TemplateRenderer,
    bindings: &'a SharedBindings,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        unique_name: &'a UniqueName,
        work_dir: impl Into<PathBuf>,
        config: &'a Config,
        toolchain: &'a Toolchain,
        templates: &'a TemplateRenderer,
        bindings: &'a SharedBindings,
    ) -> Self {
        Self {
            unique_name,
            work_dir: work_dir.into(),
            config,
            toolchain,
            templates,
            bindings,
        }
    }

    pub fn unique_name(&self) -> &UniqueName {
        self.unique_name
    }

    /// The output directory for this (schema, language) pair.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn tools(&self) -> &ToolsConfig {
        self.toolchain.tools()
    }

    pub fn bindings(&self) -> &SharedBindings {
        self.bindings
    }

    /// A path inside the output directory.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.work_dir.join(relative)
    }

    /// File name of the schema copy in the output directory.
    pub fn schema_file(&self) -> String {
        self.unique_name.schema_file_name()
    }

    /// Resolve a configured tool to an executable path.
    pub fn locate(&self, program: &str) -> Result<PathBuf> {
        self.toolchain.locate(program)
    }

    /// A schema compiler invocation importing the output directory.
    pub fn protoc(&self) -> Protoc {
        self.toolchain.protoc().include(".")
    }

    /// Run `protoc` on the schema copy in the output directory.
    pub fn run_protoc(&self, protoc: Protoc) -> Result<()> {
        let command = protoc.schema(self.schema_file()).command(&self.work_dir);
        self.run(&command)
    }

    /// A command for `program` running in the output directory.
    pub fn command(&self, program: impl Into<String>) -> ToolCommand {
        ToolCommand::new(program, &self.work_dir)
    }

    pub fn run(&self, command: &ToolCommand) -> Result<()> {
        self.toolchain.run(command)
    }

    /// Render a template into the output directory as `dest`.
    pub fn render_template(&self, template: &str, dest: &str) -> Result<()> {
        self.templates
            .write(template, self.unique_name, &self.path(dest))
    }

    /// Path to a client generator plugin produced by the build tool.
    pub fn client_generator(&self, name: &str) -> Result<PathBuf> {
        let path = self.config.plugins_dir().join(name);
        if !path.is_file() {
            return Err(Error::missing_tool(path.display().to_string()));
        }
        info!(generator = %path.display(), "using client generator");
        Ok(path)
    }

    /// Fail unless a generated file exists in the output directory.
    pub fn expect_file(&self, relative: &Path) -> Result<()> {
        let path = self.path(relative);
        if path.is_file() {
            Ok(())
        } else {
            Err(Error::filesystem(
                &path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "expected generated file"),
            ))
        }
    }
}
