// ABOUTME: Inventory data model for mock cloud resource records
// ABOUTME: Loads instance records with tag lists from YAML or JSON files

pub mod error;

pub use error::{InventoryError, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A key/value label attached to a resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTag {
    #[serde(rename = "Key")]
    pub key: String,

    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    #[serde(rename = "InstanceId")]
    pub instance_id: String,

    #[serde(rename = "Tags", default)]
    pub tags: Vec<ResourceTag>,
}

impl Instance {
    /// Get a tag value by key
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub instances: Vec<Instance>,
}

impl Inventory {
    /// Demonstration records used when no data file is given
    pub fn sample() -> Self {
        Self {
            instances: vec![
                Instance {
                    instance_id: "1234567879".to_string(),
                    tags: vec![
                        ResourceTag {
                            key: "Name".to_string(),
                            value: "desvaws3012".to_string(),
                        },
                        ResourceTag {
                            key: "Function".to_string(),
                            value: "Sandbox".to_string(),
                        },
                    ],
                },
                Instance {
                    instance_id: "48965165133".to_string(),
                    tags: vec![
                        ResourceTag {
                            key: "Name".to_string(),
                            value: "desvaws3018".to_string(),
                        },
                        ResourceTag {
                            key: "Function".to_string(),
                            value: "Powerful!".to_string(),
                        },
                    ],
                },
            ],
        }
    }

    /// Load inventory from a YAML or JSON file, chosen by extension
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| InventoryError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                serde_json::from_str(&contents).map_err(|e| InventoryError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
            _ => serde_yaml::from_str(&contents).map_err(|e| InventoryError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records() {
        let inventory = Inventory::sample();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.instances[0].tag("Name"), Some("desvaws3012"));
        assert_eq!(inventory.instances[1].tag("Function"), Some("Powerful!"));
        assert_eq!(inventory.instances[0].tag("Owner"), None);
    }

    #[test]
    fn test_load_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("inventory.yaml");
        std::fs::write(
            &path,
            r#"
instances:
  - InstanceId: "42"
    Tags:
      - Key: Name
        Value: testbox
"#,
        )
        .unwrap();

        let inventory = Inventory::load(&path).unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.instances[0].instance_id, "42");
        assert_eq!(inventory.instances[0].tag("Name"), Some("testbox"));
    }

    #[test]
    fn test_load_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("inventory.json");
        std::fs::write(
            &path,
            r#"{"instances": [{"InstanceId": "7", "Tags": []}]}"#,
        )
        .unwrap();

        let inventory = Inventory::load(&path).unwrap();
        assert_eq!(inventory.len(), 1);
        assert!(inventory.instances[0].tags.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Inventory::load(Path::new("/nonexistent/inventory.yaml"));
        assert!(matches!(result, Err(InventoryError::ReadError { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        std::fs::write(&path, "instances: [not, a, record]").unwrap();

        let result = Inventory::load(&path);
        assert!(matches!(result, Err(InventoryError::ParseError { .. })));
    }
}
