// ABOUTME: Configuration management for the tfsmith application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_main_template")]
    pub main_template: String,

    #[serde(default = "default_main_output")]
    pub main_output: String,

    #[serde(default)]
    pub data_file: Option<PathBuf>,

    #[serde(default = "default_plugins")]
    pub plugins: Vec<String>,

    #[serde(default)]
    pub template_vars: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_main_template() -> String {
    "main".to_string()
}

fn default_main_output() -> String {
    "main.tf".to_string()
}

fn default_plugins() -> Vec<String> {
    vec!["aws".to_string(), "infile".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
            main_template: default_main_template(),
            main_output: default_main_output(),
            data_file: None,
            plugins: default_plugins(),
            template_vars: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = serde_yaml::from_str(&contents)?;
            config.merge_env();
            Ok(config)
        } else {
            let mut config = Config::default();
            config.merge_env();
            Ok(config)
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = vec![
            PathBuf::from("tfsmith.yaml"),
            PathBuf::from("tfsmith.yml"),
            PathBuf::from(".tfsmith.yaml"),
            PathBuf::from(".tfsmith.yml"),
        ];

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".tfsmith").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("tfsmith.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        if let Ok(dir) = std::env::var("TFSMITH_TEMPLATES_DIR") {
            self.templates_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("TFSMITH_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Ok(level) = std::env::var("TFSMITH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TFSMITH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Merge additional variables into template variables
    pub fn merge_variables(&mut self, vars: HashMap<String, String>) {
        self.template_vars.extend(vars);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.main_template, "main");
        assert_eq!(config.main_output, "main.tf");
        assert_eq!(config.plugins, vec!["aws", "infile"]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("tfsmith.yaml");

        let config_content = r#"
templates_dir: custom_templates
main_template: stack
plugins:
  - infile
logging:
  level: debug
  format: compact
"#;
        std::fs::write(&config_path, config_content).unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from("custom_templates"));
        assert_eq!(config.main_template, "stack");
        assert_eq!(config.plugins, vec!["infile"]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");

        // Unspecified fields keep their defaults
        assert_eq!(config.main_output, "main.tf");
    }

    #[test]
    fn test_env_merge() {
        std::env::set_var("TFSMITH_LOG_LEVEL", "trace");

        let config =
            Config::load(Some(PathBuf::from("/nonexistent/tfsmith.yaml"))).unwrap();
        assert_eq!(config.logging.level, "trace");

        std::env::remove_var("TFSMITH_LOG_LEVEL");
    }

    #[test]
    fn test_merge_variables() {
        let mut config = Config::default();
        let mut vars = HashMap::new();
        vars.insert("region".to_string(), "eu-west-1".to_string());
        config.merge_variables(vars);

        assert_eq!(
            config.template_vars.get("region"),
            Some(&"eu-west-1".to_string())
        );
    }
}
