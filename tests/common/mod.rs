// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds throwaway project directories with templates and inventory data

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_INVENTORY: &str = r#"instances:
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

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.path().join("templates")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("generated")
    }

    pub fn write_template(&self, name: &str, source: &str) {
        let dir = self.templates_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.hbs", name)), source).unwrap();
    }

    pub fn write_inventory(&self, contents: &str) -> PathBuf {
        let path = self.path().join("inventory.yaml");
        fs::write(&path, contents).unwrap();
        path
    }
}
