// ABOUTME: Render context carrying inventory records, user variables, and generator metadata
// ABOUTME: Serialized to JSON before being handed to the Handlebars registry

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use super::error::{Result, TemplateError};
use crate::inventory::{Instance, Inventory};

#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub instances: Vec<Instance>,
    pub variables: HashMap<String, String>,
    pub root_directory: String,
    pub generator: GeneratorInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl TemplateContext {
    /// Create a render context for the given inventory.
    ///
    /// `root_directory` is the directory the `infile` directive resolves
    /// its destinations against.
    pub fn new(
        inventory: &Inventory,
        variables: &HashMap<String, String>,
        root_directory: impl Into<String>,
    ) -> Self {
        Self {
            instances: inventory.instances.clone(),
            variables: variables.clone(),
            root_directory: root_directory.into(),
            generator: GeneratorInfo::current(),
        }
    }

    /// Add or update a variable
    pub fn set_variable(&mut self, key: String, value: String) {
        self.variables.insert(key, value);
    }

    /// Get a variable value
    pub fn get_variable(&self, key: &str) -> Option<&String> {
        self.variables.get(key)
    }

    /// Add multiple variables
    pub fn extend_variables(&mut self, vars: HashMap<String, String>) {
        self.variables.extend(vars);
    }

    /// Convert the context to JSON for rendering
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(TemplateError::JsonError)
    }
}

impl GeneratorInfo {
    pub fn current() -> Self {
        Self {
            name: "tfsmith".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let mut variables = HashMap::new();
        variables.insert("env".to_string(), "test".to_string());

        let context = TemplateContext::new(&Inventory::sample(), &variables, "generated");

        assert_eq!(context.get_variable("env"), Some(&"test".to_string()));
        assert_eq!(context.root_directory, "generated");
        assert_eq!(context.instances.len(), 2);
        assert_eq!(context.generator.name, "tfsmith");
    }

    #[test]
    fn test_variable_updates() {
        let mut context = TemplateContext::new(&Inventory::default(), &HashMap::new(), ".");

        context.set_variable("region".to_string(), "eu-west-1".to_string());
        assert_eq!(
            context.get_variable("region"),
            Some(&"eu-west-1".to_string())
        );

        let mut more = HashMap::new();
        more.insert("profile".to_string(), "sandbox".to_string());
        context.extend_variables(more);
        assert_eq!(
            context.get_variable("profile"),
            Some(&"sandbox".to_string())
        );
    }

    #[test]
    fn test_context_json_conversion() {
        let context = TemplateContext::new(&Inventory::sample(), &HashMap::new(), ".");
        let json = context.to_json().unwrap();

        assert!(json.is_object());
        assert!(json["instances"].is_array());
        assert_eq!(json["root_directory"], ".");
        assert!(json["generator"]["version"].is_string());
    }
}
