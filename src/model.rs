//! Data model for extracted documentation — format-agnostic.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Ordered multi-map of tag name to tag values.
///
/// Tag names keep the order in which they were first seen; repeated tags
/// append to the existing sequence. A present tag always has at least one
/// value, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: Vec<(String, Vec<String>)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(n, values)| (n.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TagMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

/// Result of parsing one comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParsedComment {
    /// Formatted body text; empty when the comment has no prose.
    pub description: String,
    pub tags: TagMap,
}

/// A hyperlink to a documentation page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    pub text: String,
    pub target: String,
}

impl Link {
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<a href=\"{}\">{}</a>",
            html_escape(&self.target),
            html_escape(&self.text)
        )
    }
}

/// Contiguous 1-indexed inclusive block of lines in a source file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SourceRange {
    pub path: PathBuf,
    pub start: usize,
    pub end: usize,
}

/// A documented method of an entity.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MethodDoc {
    pub name: String,
    pub description: String,
    pub tags: TagMap,
    pub range: SourceRange,
    /// Dedented source text, when it could be read.
    pub source: Option<String>,
}

/// A documented class-like unit.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Entity {
    pub name: String,
    pub description: String,
    pub tags: TagMap,
    /// Sorted by name.
    pub methods: Vec<MethodDoc>,
}

impl Entity {
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}

/// Links grouped under one category of a package.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Category {
    pub name: String,
    pub links: Vec<Link>,
}

/// Navigation tree: package → categories (first-seen order) → links.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MenuTree {
    /// Keyed by package name, which keeps packages sorted ascending.
    pub packages: BTreeMap<String, Vec<Category>>,
}

impl MenuTree {
    pub fn push(&mut self, package: &str, category: &str, link: Link) {
        let categories = self.packages.entry(package.to_string()).or_default();
        match categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.links.push(link),
            None => categories.push(Category {
                name: category.to_string(),
                links: vec![link],
            }),
        }
    }

    pub fn links(&self, package: &str, category: &str) -> Option<&[Link]> {
        self.packages
            .get(package)?
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.links.as_slice())
    }

    pub fn package_names(&self) -> Vec<&str> {
        self.packages.keys().map(String::as_str).collect()
    }
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
