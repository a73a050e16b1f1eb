// ABOUTME: Command implementations for the tfsmith CLI
// ABOUTME: Handles execution of generate, validate, init, and plugins commands

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::config::Config;
use crate::inventory::Inventory;
use crate::output::{self, FileWriter, RenderedOutputs};
use crate::plugins::PluginManager;
use crate::template::{TemplateContext, TemplateEngine};

/// Render the main template and any side files
pub fn generate(
    data: Option<PathBuf>,
    out: Option<PathBuf>,
    print: bool,
    dry_run: bool,
    config: &Config,
) -> Result<()> {
    let output_dir = out.unwrap_or_else(|| config.output_dir.clone());

    // Inventory: explicit flag, configured file, or the built-in sample
    let inventory = match data.or_else(|| config.data_file.clone()) {
        Some(path) => {
            info!("Loading inventory from {}", path.display());
            Inventory::load(&path)?
        }
        None => {
            info!("No inventory file configured, using sample data");
            Inventory::sample()
        }
    };
    info!("Loaded {} instances", inventory.len());

    let mut engine = TemplateEngine::new();
    let count = engine.load_templates_dir(&config.templates_dir)?;
    info!(
        "Registered {} templates from {}",
        count,
        config.templates_dir.display()
    );

    let manager = PluginManager::new();
    let loaded = manager.load_all(&mut engine, &config.plugins);
    debug!("{} of {} plugins loaded", loaded, config.plugins.len());

    if !engine.has_template(&config.main_template) {
        return Err(anyhow::anyhow!(
            "Main template \"{}\" not found in {}",
            config.main_template,
            config.templates_dir.display()
        ));
    }

    if dry_run {
        info!("Dry run - templates and plugins loaded successfully");
        println!("✓ {} templates, {} plugins", count, loaded);
        return Ok(());
    }

    let context = TemplateContext::new(
        &inventory,
        &config.template_vars,
        output_dir.display().to_string(),
    );

    let mut outputs = RenderedOutputs::new();
    let rendered = engine.render(&config.main_template, &context)?;
    outputs.insert(config.main_output.clone(), rendered);

    if print {
        output::print_outputs(&outputs);
    } else {
        let writer = FileWriter::new(&output_dir);
        let written = writer.write_all(&outputs)?;
        for path in &written {
            println!("✓ {}", path.display());
        }
    }

    info!("Generation completed");
    Ok(())
}

/// Compile-check every template in the directory
pub fn validate(templates_dir: Option<PathBuf>, config: &Config) -> Result<()> {
    let dir = templates_dir.unwrap_or_else(|| config.templates_dir.clone());
    info!("Validating templates in {}", dir.display());

    let engine = TemplateEngine::new();
    let mut checked = 0;
    let mut failures = 0;

    for entry in std::fs::read_dir(&dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("hbs") {
            continue;
        }

        let source = std::fs::read_to_string(&path)?;
        match engine.validate_template(&source) {
            Ok(()) => {
                checked += 1;
                println!("✓ {}", path.display());
            }
            Err(e) => {
                failures += 1;
                println!("✗ {}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(anyhow::anyhow!(
            "{} of {} templates failed validation",
            failures,
            checked + failures
        ));
    }

    println!("✓ {} templates valid", checked);
    Ok(())
}

/// Scaffold a starter project directory
pub fn init_project(name: &str, output_dir: &Path) -> Result<()> {
    let root = output_dir.join(name);
    let templates = root.join("templates");
    std::fs::create_dir_all(&templates)?;

    std::fs::write(root.join("tfsmith.yaml"), STARTER_CONFIG)?;
    std::fs::write(root.join("inventory.yaml"), STARTER_INVENTORY)?;
    std::fs::write(templates.join("main.hbs"), STARTER_MAIN_TEMPLATE)?;
    std::fs::write(templates.join("backend.hbs"), STARTER_BACKEND_TEMPLATE)?;

    info!("Project scaffolded at {}", root.display());
    println!("✓ Project created at {}", root.display());
    println!("  Run: cd {} && tfsmith generate", root.display());
    Ok(())
}

/// List the plugin catalog
pub fn list_plugins() -> Result<()> {
    let manager = PluginManager::new();

    for plugin in manager.plugins() {
        println!("{} - {}", plugin.name(), plugin.description());
        for component in plugin.components() {
            println!("  {} \"{}\"", component.kind(), component.name());
        }
    }

    Ok(())
}

const STARTER_CONFIG: &str = r#"templates_dir: templates
output_dir: generated
main_template: main
main_output: main.tf
data_file: inventory.yaml
plugins:
  - aws
  - infile
logging:
  level: info
  format: pretty
"#;

const STARTER_INVENTORY: &str = r#"instances:
  - InstanceId: "1234567879"
    Tags:
      - Key: Name
        Value: desvaws3012
      - Key: Function
        Value: Sandbox
  - InstanceId: "48965165133"
    Tags:
      - Key: Name
        Value: desvaws3018
      - Key: Function
        Value: Powerful!
"#;

const STARTER_MAIN_TEMPLATE: &str = r#"# Managed by {{generator.name}} v{{generator.version}}. Do not edit by hand.
{{*set environment="sandbox"}}
{{infile "backend.tf" "backend"}}

locals {
  environment = "{{environment}}"
}

{{#each instances}}
resource "aws_instance" "instance_{{InstanceId}}" {
  # {{aws_tag this "Name"}}
  instance_type = "t3.micro"
  {{> tags_block}}
}

{{/each}}
{{#infile "extra/outputs.tf"}}
# Generated outputs. Do not edit by hand.

{{#each instances}}
output "instance_{{InstanceId}}_name" {
  value = "{{aws_tag this "Name"}}"
}

{{/each}}
{{/infile}}
"#;

const STARTER_BACKEND_TEMPLATE: &str = r#"terraform {
  backend "local" {
    path = "{{root_directory}}/terraform.tfstate"
  }
}
"#;
