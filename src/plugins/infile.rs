// ABOUTME: Side-file plugin writing rendered template output to separate files
// ABOUTME: Contributes the infile block helper and the set decorator

use handlebars::{
    Context, Decorator, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderError, Renderable, StringOutput,
};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{Plugin, PluginComponent};

/// Helper writing rendered content to a file instead of the main output.
///
/// Block form renders the body with the current context:
/// `{{#infile "network.tf"}}...{{/infile}}`. Inline form renders another
/// registered template: `{{infile "network.tf" "network"}}`. The
/// destination is resolved under the context's `root_directory`
/// (defaulting to `.`) and parent directories are created as needed.
pub struct InfileHelper;

impl HelperDef for InfileHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        _out: &mut dyn Output,
    ) -> HelperResult {
        let destination = h
            .param(0)
            .and_then(|v| v.value().as_str())
            .ok_or_else(|| RenderError::new("infile requires a destination path parameter"))?
            .to_string();

        let content = if let Some(tpl) = h.template() {
            let mut buffer = StringOutput::new();
            tpl.render(r, ctx, rc, &mut buffer)?;
            buffer
                .into_string()
                .map_err(|e| RenderError::new(format!("infile buffer error: {}", e)))?
        } else if let Some(name) = h.param(1).and_then(|v| v.value().as_str()) {
            let current = match rc.context() {
                Some(c) => (*c).clone(),
                None => ctx.clone(),
            };
            r.render_with_context(name, &current)?
        } else {
            return Err(RenderError::new(
                "infile requires a block body or a template name parameter",
            ));
        };

        let root = {
            let override_ctx = rc.context();
            let data = match override_ctx.as_deref() {
                Some(c) => c.data(),
                None => ctx.data(),
            };
            data.get("root_directory")
                .and_then(JsonValue::as_str)
                .unwrap_or(".")
                .to_string()
        };

        let path = Path::new(&root).join(&destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                RenderError::new(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        fs::write(&path, &content).map_err(|e| {
            RenderError::new(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        debug!(
            "Side file written: {} ({} bytes)",
            path.display(),
            content.len()
        );
        Ok(())
    }
}

/// set decorator - merges its hash parameters into the render context.
///
/// `{{*set root_directory="generated/extras"}}` makes later lookups of
/// `root_directory` resolve to the new value.
pub fn set_decorator(
    d: &Decorator,
    _: &Handlebars,
    ctx: &Context,
    rc: &mut RenderContext,
) -> std::result::Result<(), RenderError> {
    let mut new_ctx = match rc.context() {
        Some(c) => (*c).clone(),
        None => ctx.clone(),
    };
    {
        let data = new_ctx.data_mut();
        if let Some(map) = data.as_object_mut() {
            for (key, value) in d.hash() {
                map.insert(key.to_string(), value.value().clone());
            }
        }
    }
    rc.set_context(new_ctx);
    Ok(())
}

pub struct InfilePlugin;

impl Plugin for InfilePlugin {
    fn name(&self) -> &'static str {
        "infile"
    }

    fn description(&self) -> &'static str {
        "Side-file directive writing rendered blocks under the root directory, plus the set decorator"
    }

    fn components(&self) -> Vec<PluginComponent> {
        vec![
            PluginComponent::Helper {
                name: "infile".to_string(),
                def: Box::new(InfileHelper),
            },
            PluginComponent::Decorator {
                name: "set".to_string(),
                def: Box::new(set_decorator),
            },
        ]
    }
}
