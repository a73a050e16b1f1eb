// ABOUTME: Template engine module for the tfsmith generator
// ABOUTME: Provides Handlebars rendering, render contexts, and built-in helpers

pub mod context;
pub mod engine;
pub mod error;
pub mod helpers;

pub use context::{GeneratorInfo, TemplateContext};
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
