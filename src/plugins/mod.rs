// ABOUTME: Plugin catalog and loader for template engine extensions
// ABOUTME: Dispatches plugin-declared components to engine registration calls

pub mod aws;
pub mod error;
pub mod infile;

pub use error::{PluginError, Result};

use handlebars::{DecoratorDef, HelperDef};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::template::TemplateEngine;

/// A single capability a plugin contributes to the template engine.
pub enum PluginComponent {
    /// Named helper function, callable from template expressions
    Helper {
        name: String,
        def: Box<dyn HelperDef + Send + Sync>,
    },
    /// Named rendering decorator (`{{*name ...}}`)
    Decorator {
        name: String,
        def: Box<dyn DecoratorDef + Send + Sync>,
    },
    /// Named partial template source
    Partial { name: String, source: String },
}

impl PluginComponent {
    pub fn name(&self) -> &str {
        match self {
            PluginComponent::Helper { name, .. } => name,
            PluginComponent::Decorator { name, .. } => name,
            PluginComponent::Partial { name, .. } => name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PluginComponent::Helper { .. } => "helper",
            PluginComponent::Decorator { .. } => "decorator",
            PluginComponent::Partial { .. } => "partial",
        }
    }
}

pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Discover the components this plugin contributes
    fn components(&self) -> Vec<PluginComponent>;
}

pub struct PluginManager {
    plugins: HashMap<String, Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        let mut manager = Self {
            plugins: HashMap::new(),
        };

        // Register all built-in plugins
        manager.register(Box::new(aws::AwsPlugin));
        manager.register(Box::new(infile::InfilePlugin));

        manager
    }

    /// Add a plugin to the catalog
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    /// Catalog entries sorted by plugin name
    pub fn plugins(&self) -> Vec<&dyn Plugin> {
        let mut plugins: Vec<&dyn Plugin> = self.plugins.values().map(|p| p.as_ref()).collect();
        plugins.sort_by_key(|p| p.name());
        plugins
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins().into_iter().map(|p| p.name()).collect()
    }

    /// Load the named plugin into the engine.
    ///
    /// The engine is left unmodified when the plugin is unknown or
    /// provides no components.
    pub fn load_plugin(&self, engine: &mut TemplateEngine, name: &str) -> Result<()> {
        debug!("Loading plugin: {}...", name);
        let plugin = self
            .plugins
            .get(name)
            .ok_or_else(|| PluginError::NotFound(name.to_string()))?;

        let components = plugin.components();
        if components.is_empty() {
            return Err(PluginError::Empty(name.to_string()));
        }

        let total = components.len();
        debug!("{} components found in {}", total, name);

        for (i, component) in components.into_iter().enumerate() {
            debug!("Loading component {}/{}", i + 1, total);
            self.load_component(engine, component)?;
        }

        debug!("Plugin {} loaded", name);
        Ok(())
    }

    fn load_component(&self, engine: &mut TemplateEngine, component: PluginComponent) -> Result<()> {
        match component {
            PluginComponent::Helper { name, def } => {
                if engine.register_helper(&name, def) {
                    warn!(
                        "There is already a helper named \"{}\", the previous one is replaced",
                        name
                    );
                }
            }
            PluginComponent::Decorator { name, def } => {
                if engine.register_decorator(&name, def) {
                    warn!(
                        "There is already a decorator named \"{}\", the previous one is replaced",
                        name
                    );
                }
            }
            PluginComponent::Partial { name, source } => {
                let replaced = engine.register_partial(&name, &source).map_err(|e| {
                    PluginError::PartialRegistration {
                        name: name.clone(),
                        message: e.to_string(),
                    }
                })?;
                if replaced {
                    warn!(
                        "There is already a template named \"{}\", the previous one is replaced",
                        name
                    );
                }
            }
        }
        Ok(())
    }

    /// Load every named plugin, logging and skipping failures.
    /// Returns the number of plugins loaded.
    pub fn load_all(&self, engine: &mut TemplateEngine, names: &[String]) -> usize {
        let mut loaded = 0;
        for name in names {
            match self.load_plugin(engine, name) {
                Ok(()) => loaded += 1,
                Err(e) => warn!("Plugin \"{}\" not loaded: {}", name, e),
            }
        }
        loaded
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
