// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for tfsmith

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tfsmith")]
#[command(about = "Generates Terraform configuration from inventory data using Handlebars templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the main template and any side files
    Generate {
        #[arg(short, long, help = "Path to inventory data file (YAML or JSON)")]
        data: Option<PathBuf>,

        #[arg(short, long, help = "Output directory for generated files")]
        out: Option<PathBuf>,

        #[arg(
            short = 'V',
            long = "var",
            help = "Override template variables (key=value)"
        )]
        vars: Vec<String>,

        #[arg(long, help = "Print rendered outputs to stdout instead of writing files")]
        print: bool,

        #[arg(long, help = "Dry run - load templates and plugins without rendering")]
        dry_run: bool,
    },

    /// Compile-check every template without rendering
    Validate {
        #[arg(help = "Templates directory (defaults to the configured one)")]
        templates_dir: Option<PathBuf>,
    },

    /// Scaffold a starter project
    Init {
        #[arg(help = "Name of the project to create")]
        name: String,

        #[arg(short, long, help = "Output directory", default_value = ".")]
        output_dir: PathBuf,
    },

    /// List available plugins and their components
    Plugins,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(
        vars: &[String],
    ) -> anyhow::Result<std::collections::HashMap<String, String>> {
        let mut variables = std::collections::HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        let vars = vec![
            "environment=production".to_string(),
            "region=eu-west-1".to_string(),
        ];

        let parsed = Args::parse_variables(&vars).unwrap();

        assert_eq!(
            parsed.get("environment"),
            Some(&"production".to_string())
        );
        assert_eq!(parsed.get("region"), Some(&"eu-west-1".to_string()));
    }

    #[test]
    fn test_parse_variables_invalid() {
        let vars = vec!["missing_separator".to_string()];
        let result = Args::parse_variables(&vars);
        assert!(result.is_err());
    }
}
