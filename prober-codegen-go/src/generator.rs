use std::path::PathBuf;

use prober_codegen::{GenerationContext, LanguagePlugin};
use prober_config::ToolsConfig;
use prober_core::{Language, Result, UniqueName};
use tracing::{debug, info};

use crate::strip_version_marker_in_file;

/// Build descriptor for the client binary, rendered to `BUILD`.
pub const BUILD_CLIENT_TEMPLATE: &str = "go/BUILD.client.template";
/// Build descriptor for the shared bindings, rendered to `BUILD.pb` and
/// moved into the bindings tree as `BUILD`.
pub const BUILD_PB_TEMPLATE: &str = "go/BUILD.pb.template";

const BINDINGS_BUILD: &str = "BUILD.pb";

/// Go client generator
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator;

impl LanguagePlugin for Generator {
    fn language(&self) -> Language {
        Language::Go
    }

    fn required_tools<'a>(&self, tools: &'a ToolsConfig) -> Vec<&'a str> {
        vec![tools.go.as_str(), tools.protoc_gen_go.as_str()]
    }

    fn templates(&self) -> &'static [&'static str] {
        &[BUILD_CLIENT_TEMPLATE, BUILD_PB_TEMPLATE]
    }

    fn client_file(&self, unique_name: &UniqueName) -> PathBuf {
        unique_name.artifact(".grpc.client.pb.go")
    }

    fn prework(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        let unique_name = ctx.unique_name();

        ctx.render_template(BUILD_CLIENT_TEMPLATE, "BUILD")?;
        ctx.render_template(BUILD_PB_TEMPLATE, BINDINGS_BUILD)?;

        debug!("generating protobuf bindings");
        let protoc_gen_go = ctx.locate(&ctx.tools().protoc_gen_go)?;
        ctx.run_protoc(
            ctx.protoc()
                .out_with_params("go", "plugins=grpc", ".")
                .plugin("go", &protoc_gen_go),
        )?;

        let bindings = unique_name.artifact(".pb.go");
        ctx.expect_file(&bindings)?;
        let bindings = ctx.path(bindings);
        if strip_version_marker_in_file(&bindings)? {
            debug!(file = %bindings.display(), "removed proto version assertion");
        }

        let bindings_name = format!("{}.pb.go", unique_name);
        let dir = ctx.bindings().replace(
            unique_name,
            &[
                (bindings, bindings_name.as_str()),
                (ctx.path(BINDINGS_BUILD), "BUILD"),
            ],
        )?;
        info!(dir = %dir.display(), "shared bindings updated");
        Ok(())
    }

    fn try_build(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        let command = ctx
            .command(ctx.tools().go.clone())
            .arg("build")
            .arg(self.client_file(ctx.unique_name()));
        ctx.run(&command)
    }
}
