use std::path::PathBuf;

use prober_codegen::{GenerationContext, LanguagePlugin};
use prober_config::ToolsConfig;
use prober_core::{Language, Result, UniqueName};
use tracing::debug;

/// Build descriptor rendered into every C++ output directory.
pub const BUILD_TEMPLATE: &str = "cpp/BUILD.template";

/// C++ client generator
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator;

impl LanguagePlugin for Generator {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn required_tools<'a>(&self, tools: &'a ToolsConfig) -> Vec<&'a str> {
        vec![tools.grpc_cpp_plugin.as_str()]
    }

    fn templates(&self) -> &'static [&'static str] {
        &[BUILD_TEMPLATE]
    }

    fn client_file(&self, unique_name: &UniqueName) -> PathBuf {
        unique_name.artifact(".grpc.client.pb.cc")
    }

    fn prework(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        ctx.render_template(BUILD_TEMPLATE, "BUILD")?;

        debug!("generating protobuf bindings");
        ctx.run_protoc(ctx.protoc().out("cpp", "."))?;

        debug!("generating gRPC service bindings");
        let grpc_plugin = ctx.locate(&ctx.tools().grpc_cpp_plugin)?;
        ctx.run_protoc(ctx.protoc().out("grpc", ".").plugin("grpc", &grpc_plugin))
    }

    fn try_build(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        let command = ctx
            .command(ctx.tools().build_tool.clone())
            .arg("build")
            .arg(self.build_target(ctx.unique_name()));
        ctx.run(&command)
    }
}
