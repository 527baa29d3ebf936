//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::error::{KodocError, Result};
use crate::model::{Entity, MenuTree};

/// Trait for rendering extracted documentation into a specific output format.
pub trait Renderer {
    fn render_menu(&self, menu: &MenuTree) -> Result<String>;
    fn render_entity(&self, entity: &Entity) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(KodocError::UnknownFormat {
            format: format.to_string(),
        }),
    }
}
