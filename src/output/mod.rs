// ABOUTME: Collection and writing of rendered outputs
// ABOUTME: Keeps rendered files in a deterministic map and writes them to disk

pub mod error;

pub use error::{OutputError, Result};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rendered outputs keyed by file name, in deterministic order
#[derive(Debug, Default)]
pub struct RenderedOutputs {
    files: BTreeMap<String, String>,
}

impl RenderedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rendered output, returning the previous content if replaced
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) -> Option<String> {
        let name = name.into();
        let previous = self.files.insert(name.clone(), content.into());
        if previous.is_some() {
            debug!("Output \"{}\" replaced", name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Writes collected outputs under an output directory
pub struct FileWriter {
    output_dir: PathBuf,
}

impl FileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every output, creating parent directories as needed.
    /// Returns the paths written.
    pub fn write_all(&self, outputs: &RenderedOutputs) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(outputs.len());

        for (name, content) in outputs.iter() {
            let path = self.output_dir.join(name);

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| OutputError::WriteError {
                    message: format!("Failed to create directory {}: {}", parent.display(), e),
                })?;
            }

            std::fs::write(&path, content).map_err(|e| OutputError::WriteError {
                message: format!("Failed to write file {}: {}", path.display(), e),
            })?;

            info!(
                "Output written to file: {} ({} bytes)",
                path.display(),
                content.len()
            );
            written.push(path);
        }

        Ok(written)
    }
}

/// Print every output to stdout: file name, content, separator
pub fn print_outputs(outputs: &RenderedOutputs) {
    for (name, content) in outputs.iter() {
        println!("{}", name);
        println!("{}", content);
        println!("---");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_insert_replaces_previous() {
        let mut outputs = RenderedOutputs::new();
        assert!(outputs.insert("main.tf", "first").is_none());
        assert_eq!(outputs.insert("main.tf", "second").as_deref(), Some("first"));
        assert_eq!(outputs.get("main.tf"), Some("second"));
        assert_eq!(outputs.len(), 1);
    }

    #[test]
    fn test_iteration_is_ordered() {
        let mut outputs = RenderedOutputs::new();
        outputs.insert("z.tf", "z");
        outputs.insert("a.tf", "a");
        outputs.insert("m.tf", "m");

        let names: Vec<&str> = outputs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a.tf", "m.tf", "z.tf"]);
    }

    #[test]
    fn test_write_all_creates_directories() {
        let temp_dir = tempdir().unwrap();
        let mut outputs = RenderedOutputs::new();
        outputs.insert("main.tf", "resource {}");
        outputs.insert("modules/network/vpc.tf", "vpc {}");

        let writer = FileWriter::new(temp_dir.path());
        let written = writer.write_all(&outputs).unwrap();
        assert_eq!(written.len(), 2);

        let nested = temp_dir.path().join("modules/network/vpc.tf");
        assert_eq!(std::fs::read_to_string(nested).unwrap(), "vpc {}");
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("main.tf")).unwrap(),
            "resource {}"
        );
    }

    #[test]
    fn test_print_outputs_smoke() {
        let mut outputs = RenderedOutputs::new();
        outputs.insert("main.tf", "content");
        print_outputs(&outputs);
    }
}
