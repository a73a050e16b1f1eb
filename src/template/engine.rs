// ABOUTME: Template engine wrapping a Handlebars registry
// ABOUTME: Loads template files, tracks registrations, and renders with contexts

use handlebars::{DecoratorDef, Handlebars, HelperDef};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use super::context::TemplateContext;
use super::error::{Result, TemplateError};
use super::helpers;

pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    helpers: HashSet<String>,
    decorators: HashSet<String>,
    templates: HashSet<String>,
}

impl TemplateEngine {
    /// Create a new template engine with all built-in helpers
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Configure handlebars
        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        // Disable HTML escaping since we're generating HCL, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut engine = Self {
            handlebars,
            helpers: HashSet::new(),
            decorators: HashSet::new(),
            templates: HashSet::new(),
        };

        for (name, def) in helpers::builtin_helpers() {
            engine.register_helper(name, def);
        }

        engine
    }

    /// Register every `.hbs` file in the directory as a template named by
    /// its file stem. Returns the number of templates registered.
    pub fn load_templates_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut count = 0;

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("hbs") {
                continue;
            }

            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| TemplateError::InvalidName(path.display().to_string()))?
                .to_string();

            self.handlebars.register_template_file(&name, &path)?;
            if !self.templates.insert(name.clone()) {
                debug!("Template \"{}\" replaced from {}", name, path.display());
            } else {
                debug!("Registered template \"{}\" from {}", name, path.display());
            }
            count += 1;
        }

        Ok(count)
    }

    /// Render a registered template with the given context
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let json_context = context.to_json()?;
        self.render_with_json(name, &json_context)
    }

    /// Render a registered template with a JSON context
    pub fn render_with_json(&self, name: &str, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render(name, context)
            .map_err(TemplateError::HandlebarsError)
    }

    /// Render a template string with a JSON context
    pub fn render_template_str(&self, template: &str, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(TemplateError::HandlebarsError)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError(e.to_string())),
        }
    }

    /// Register a helper, returning true when an existing binding was replaced
    pub fn register_helper(&mut self, name: &str, def: Box<dyn HelperDef + Send + Sync>) -> bool {
        let replaced = !self.helpers.insert(name.to_string());
        self.handlebars.register_helper(name, def);
        replaced
    }

    /// Register a decorator, returning true when an existing binding was replaced
    pub fn register_decorator(
        &mut self,
        name: &str,
        def: Box<dyn DecoratorDef + Send + Sync>,
    ) -> bool {
        let replaced = !self.decorators.insert(name.to_string());
        self.handlebars.register_decorator(name, def);
        replaced
    }

    /// Register a partial template, returning true when an existing
    /// template of the same name was replaced
    pub fn register_partial(&mut self, name: &str, source: &str) -> Result<bool> {
        self.handlebars.register_template_string(name, source)?;
        Ok(!self.templates.insert(name.to_string()))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains(name)
    }

    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains(name)
    }

    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.contains(name)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
