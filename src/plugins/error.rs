// ABOUTME: Error types for plugin loading
// ABOUTME: Covers unknown plugins, empty plugins, and failed partial registration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("No plugin named \"{0}\" in the catalog")]
    NotFound(String),

    #[error("Plugin \"{0}\" provides no components")]
    Empty(String),

    #[error("Failed to register partial \"{name}\": {message}")]
    PartialRegistration { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, PluginError>;
