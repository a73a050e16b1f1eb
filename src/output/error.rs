// ABOUTME: Error types for output writing
// ABOUTME: Wraps filesystem failures with the destination path

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("{message}")]
    WriteError { message: String },
}

pub type Result<T> = std::result::Result<T, OutputError>;
