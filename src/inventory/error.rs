// ABOUTME: Error types for inventory loading
// ABOUTME: Distinguishes unreadable files from malformed ones

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Failed to read inventory file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse inventory file {path}: {message}")]
    ParseError { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, InventoryError>;
