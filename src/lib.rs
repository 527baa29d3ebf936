//! kodoc — API documentation extracted from doc-commented class files.
//!
//! The pipeline:
//!
//! 1. **Registry** — list class files and derive canonical entity names
//! 2. **Reflect** — find each class's doc block, methods and line ranges
//! 3. **Parse** — split doc blocks into formatted body and transformed tags
//! 4. **Menu** — group entity links by `@package` and `@category`
//!
//! Method source is sliced out of the class file on demand.

pub mod config;
pub mod entity;
pub mod error;
pub mod markup;
pub mod menu;
pub mod model;
pub mod parser;
pub mod reflect;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod source;

pub use error::{KodocError, Result};
