use std::path::PathBuf;

use prober_codegen::{GenerationContext, LanguagePlugin};
use prober_config::ToolsConfig;
use prober_core::{Language, Result, UniqueName};
use tracing::debug;

/// Build descriptor rendered into every Python output directory.
pub const BUILD_TEMPLATE: &str = "python/BUILD.template";

/// Python client generator
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator;

impl LanguagePlugin for Generator {
    fn language(&self) -> Language {
        Language::Python
    }

    fn required_tools<'a>(&self, tools: &'a ToolsConfig) -> Vec<&'a str> {
        vec![tools.python.as_str(), tools.grpc_python_plugin.as_str()]
    }

    fn templates(&self) -> &'static [&'static str] {
        &[BUILD_TEMPLATE]
    }

    fn client_file(&self, unique_name: &UniqueName) -> PathBuf {
        unique_name.artifact(".grpc.client.pb.py")
    }

    fn prework(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        ctx.render_template(BUILD_TEMPLATE, "BUILD")?;

        debug!("generating protobuf and gRPC bindings");
        let grpc_plugin = ctx.locate(&ctx.tools().grpc_python_plugin)?;
        ctx.run_protoc(
            ctx.protoc()
                .out("python", ".")
                .out("grpc", ".")
                .plugin("grpc", &grpc_plugin),
        )
    }

    /// Byte-compiles the client; interpreted targets have no separate build.
    fn try_build(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        let command = ctx
            .command(ctx.tools().python.clone())
            .args(["-m", "py_compile"])
            .arg(self.client_file(ctx.unique_name()));
        ctx.run(&command)
    }
}
