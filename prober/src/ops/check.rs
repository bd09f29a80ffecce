//! Check operation - toolchain and template preflight.

use prober_codegen::{TemplateRenderer, Toolchain};
use prober_config::Config;
use prober_core::LanguageSelection;

use crate::{
    language::LanguageSupport,
    reports::{CheckReport, ResourceStatus},
};

/// Execute the check operation.
///
/// Resolves every tool and template the selected languages need, without
/// running anything.
pub fn check(config: &Config, languages: &LanguageSelection) -> CheckReport {
    let toolchain = Toolchain::new(config);
    let templates = TemplateRenderer::new(config.templates_dir());
    let plugins_dir = config.plugins_dir();
    let tools = toolchain.tools();

    let mut names = vec![tools.protoc.as_str(), tools.build_tool.as_str()];
    let mut template_status = Vec::new();
    let mut generators = Vec::new();

    for language in languages.iter() {
        let plugin = LanguageSupport::get(language).plugin();
        for tool in plugin.required_tools(tools) {
            if !names.contains(&tool) {
                names.push(tool);
            }
        }
        for template in plugin.templates() {
            let path = templates.path(template);
            template_status.push(ResourceStatus {
                name: (*template).to_string(),
                found: path.is_file().then_some(path),
            });
        }
        let generator = plugins_dir.join(plugin.client_generator());
        generators.push(ResourceStatus {
            name: plugin.client_generator(),
            found: generator.is_file().then_some(generator),
        });
    }

    let tool_status = names
        .into_iter()
        .map(|name| ResourceStatus {
            name: name.to_string(),
            found: toolchain.locate(name).ok(),
        })
        .collect();

    CheckReport {
        root: config.root().to_path_buf(),
        languages: languages.to_string(),
        tools: tool_status,
        templates: template_status,
        generators,
    }
}
