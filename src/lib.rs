// ABOUTME: Main library module for the tfsmith configuration generator
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod inventory;
pub mod output;
pub mod plugins;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use inventory::{Instance, Inventory, ResourceTag};
pub use output::{FileWriter, RenderedOutputs};
pub use plugins::{Plugin, PluginComponent, PluginManager};
pub use template::{TemplateContext, TemplateEngine};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
