//! Build configuration and the collaborators it selects.

use crate::markup::{self, MarkupFormatter};
use crate::parser::{ParseContext, TagTransforms};
use crate::registry::Layout;
use crate::resolver::RouteResolver;
use std::path::PathBuf;

/// Settings for one documentation build.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the class files.
    pub root: PathBuf,
    pub layout: Layout,
    /// Prefix of entities that only extend another entity.
    pub prefix: String,
    /// Route that entity links are built under.
    pub route: String,
    /// Skip Markdown and keep comment bodies as written.
    pub plain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("classes"),
            layout: Layout::default(),
            prefix: "kohana".to_string(),
            route: "/guide/api".to_string(),
            plain: false,
        }
    }
}

impl Config {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            resolver: RouteResolver::new(self.route.as_str()),
            formatter: markup::create_formatter(self.plain),
            transforms: TagTransforms::default(),
        }
    }
}

/// Owned resolver, formatter and transform table for a build.
pub struct Collaborators {
    pub resolver: RouteResolver,
    pub formatter: Box<dyn MarkupFormatter>,
    pub transforms: TagTransforms,
}

impl Collaborators {
    pub fn context(&self) -> ParseContext<'_> {
        ParseContext {
            resolver: &self.resolver,
            formatter: self.formatter.as_ref(),
            transforms: &self.transforms,
        }
    }
}
