//! Generation orchestration.
//!
//! A [`Pipeline`] validates the schema argument, checks the toolchain,
//! optionally rebuilds the client generator plugins and then runs every
//! requested [`LanguagePlugin`] in its own output directory. The
//! [`TestDriver`] runs a pipeline over a directory of schema fixtures and
//! builds every generated client.
//!
//! # Example
//!
//! ```ignore
//! let pipeline = Pipeline::new(config)
//!     .plugin(CppGenerator)
//!     .plugin(GoGenerator);
//!
//! let schema = Path::new("protos/echo.proto");
//! let report = pipeline.generate(schema, &LanguageSelection::all(), true)?;
//! ```

mod driver;
mod report;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use driver::TestDriver;
use prober_config::{Config, RebuildPolicy};
use prober_core::{Error, Language, LanguageSelection, Result, UniqueName};
pub use report::{GenerateReport, LanguageOutcome, RebuildOutcome, TestReport};
use tracing::{info, info_span, warn};

use crate::{
    GenerationContext, LanguagePlugin, OutputLayout, SharedBindings, TemplateRenderer,
    ToolCommand, Toolchain,
};

/// Drives client generation for one configuration.
pub struct Pipeline {
    config: Config,
    toolchain: Toolchain,
    templates: TemplateRenderer,
    layout: OutputLayout,
    bindings: SharedBindings,
    plugins: Vec<Box<dyn LanguagePlugin>>,
    rebuild_policy: RebuildPolicy,
}

impl Pipeline {
    /// Create a pipeline with no plugins registered.
    pub fn new(config: Config) -> Self {
        Self {
            toolchain: Toolchain::new(&config),
            templates: TemplateRenderer::new(config.templates_dir()),
            layout: OutputLayout::new(config.output_root()),
            bindings: SharedBindings::new(config.bindings_root()),
            plugins: Vec::new(),
            rebuild_policy: config.rebuild.policy,
            config,
        }
    }

    /// Register a language plugin. A later plugin for the same language wins.
    pub fn plugin(mut self, plugin: impl LanguagePlugin + 'static) -> Self {
        self.register(Box::new(plugin));
        self
    }

    /// Register several boxed plugins.
    pub fn with_plugins(
        mut self,
        plugins: impl IntoIterator<Item = Box<dyn LanguagePlugin>>,
    ) -> Self {
        for plugin in plugins {
            self.register(plugin);
        }
        self
    }

    /// Override the rebuild policy from the configuration.
    pub fn rebuild_policy(mut self, policy: RebuildPolicy) -> Self {
        self.rebuild_policy = policy;
        self
    }

    fn register(&mut self, plugin: Box<dyn LanguagePlugin>) {
        let language = plugin.language();
        self.plugins.retain(|p| p.language() != language);
        self.plugins.push(plugin);
    }

    /// The plugin registered for a language.
    pub fn plugin_for(&self, language: Language) -> Option<&dyn LanguagePlugin> {
        self.plugins
            .iter()
            .find(|p| p.language() == language)
            .map(|p| p.as_ref())
    }

    /// Check that the schema compiler and build tool resolve.
    pub fn preflight(&self) -> Result<()> {
        let tools = self.toolchain.tools();
        self.toolchain
            .require([tools.protoc.as_str(), tools.build_tool.as_str()])
    }

    /// Rebuild the client generator plugins for `languages`.
    ///
    /// Builds `:all` when every known language is requested, otherwise one
    /// `:<lang>_generator` target per language. Under the best-effort policy
    /// a failure is logged and returned as [`RebuildOutcome::Failed`]; under
    /// the strict policy it is returned as an error.
    pub fn rebuild(&self, languages: &LanguageSelection) -> Result<RebuildOutcome> {
        let commands: Vec<ToolCommand> = if languages.covers_all() {
            vec![self.toolchain.build_tool().args(["build", ":all"])]
        } else {
            languages
                .iter()
                .map(|lang| {
                    self.toolchain
                        .build_tool()
                        .args(["build".to_string(), lang.generator_target()])
                })
                .collect()
        };

        let mut outcome = RebuildOutcome::Succeeded;
        for command in &commands {
            info!(command = %command, "rebuilding client generators");
            if let Err(err) = self.toolchain.run(command) {
                if self.rebuild_policy.is_strict() {
                    return Err(err);
                }
                warn!(error = %err, "rebuilding client generators failed; using existing plugins");
                if outcome.is_success() {
                    outcome = RebuildOutcome::Failed(err);
                }
            }
        }
        Ok(outcome)
    }

    /// Generate clients for `schema` in every requested language.
    ///
    /// Returns an error only for problems that stop the whole run: an invalid
    /// schema argument, a missing schema compiler or build tool, or a failed
    /// rebuild under the strict policy. Per-language failures are recorded in
    /// the report and do not stop the remaining languages.
    pub fn generate(
        &self,
        schema: &Path,
        languages: &LanguageSelection,
        rebuild: bool,
    ) -> Result<GenerateReport> {
        let unique_name = UniqueName::from_schema_path(schema)?;
        if !schema.is_file() {
            return Err(Error::invalid_input(schema, "no such file"));
        }

        self.preflight()?;

        let rebuild = if rebuild {
            Some(self.rebuild(languages)?)
        } else {
            None
        };

        let schema = std::path::absolute(schema).map_err(|e| Error::filesystem(schema, e))?;
        let schema_source =
            fs::read_to_string(&schema).map_err(|e| Error::filesystem(&schema, e))?;

        let mut outcomes = Vec::new();
        for language in languages.iter() {
            let Some(plugin) = self.plugin_for(language) else {
                warn!(%language, "no plugin registered, skipping");
                continue;
            };

            let _span = info_span!("generate", schema = %unique_name, %language).entered();
            let output_dir = self.layout.dir_for(&unique_name, language);
            let result = self.generate_language(plugin, &unique_name, &schema_source);
            match &result {
                Ok(()) => info!(dir = %output_dir.display(), "client generated"),
                Err(err) => warn!(error = %err, "generation failed"),
            }
            outcomes.push(LanguageOutcome {
                language,
                output_dir,
                result,
            });
        }

        Ok(GenerateReport {
            schema,
            unique_name,
            rebuild,
            outcomes,
        })
    }

    fn generate_language(
        &self,
        plugin: &dyn LanguagePlugin,
        unique_name: &UniqueName,
        schema_source: &str,
    ) -> Result<()> {
        self.toolchain
            .require(plugin.required_tools(self.toolchain.tools()))?;

        let work_dir = self
            .layout
            .prepare(unique_name, plugin.language(), schema_source)?;
        let ctx = self.context_in(unique_name, work_dir);

        info!("prework");
        plugin.prework(&ctx)?;
        info!("generating client");
        plugin.generate_client(&ctx)
    }

    /// Context for a language's existing output directory.
    pub fn context<'a>(
        &'a self,
        unique_name: &'a UniqueName,
        language: Language,
    ) -> GenerationContext<'a> {
        self.context_in(unique_name, self.layout.dir_for(unique_name, language))
    }

    fn context_in<'a>(
        &'a self,
        unique_name: &'a UniqueName,
        work_dir: PathBuf,
    ) -> GenerationContext<'a> {
        GenerationContext::new(
            unique_name,
            work_dir,
            &self.config,
            &self.toolchain,
            &self.templates,
            &self.bindings,
        )
    }
}
