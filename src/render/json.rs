//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the model directly; tag maps keep their source order.

use crate::error::Result;
use crate::model::{Entity, MenuTree};
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render_menu(&self, menu: &MenuTree) -> Result<String> {
        let mut out = serde_json::to_string_pretty(menu)?;
        out.push('\n');
        Ok(out)
    }

    fn render_entity(&self, entity: &Entity) -> Result<String> {
        let mut out = serde_json::to_string_pretty(entity)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
