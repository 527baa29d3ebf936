//! Per-tag value transforms.
//!
//! Each transform turns the raw text after `@name` into its display value.
//! Transforms are total: a value they do not recognise passes through as-is.

use crate::model::Link;
use crate::resolver::Resolver;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Signature shared by every tag transform.
pub type TransformFn = fn(&str, &dyn Resolver) -> String;

// `Entity::method` reference in an @uses tag
static RE_USES_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z_]+)::([a-z_]+)$").unwrap());

/// Table of transforms keyed by case-sensitive tag name.
#[derive(Clone)]
pub struct TagTransforms {
    table: HashMap<String, TransformFn>,
}

impl TagTransforms {
    /// A table with no transforms; every value passes through.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Add or replace the transform for `name`.
    pub fn register(&mut self, name: impl Into<String>, transform: TransformFn) -> &mut Self {
        self.table.insert(name.into(), transform);
        self
    }

    pub fn apply(&self, name: &str, value: &str, resolver: &dyn Resolver) -> String {
        match self.table.get(name) {
            Some(transform) => transform(value, resolver),
            None => value.to_string(),
        }
    }
}

impl Default for TagTransforms {
    fn default() -> Self {
        let mut transforms = Self::empty();
        transforms
            .register("license", license)
            .register("copyright", copyright)
            .register("throws", throws)
            .register("uses", uses);
        transforms
    }
}

impl std::fmt::Debug for TagTransforms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.table.keys().collect();
        names.sort();
        f.debug_struct("TagTransforms").field("tags", &names).finish()
    }
}

/// URL licenses become a link to themselves.
pub fn license(value: &str, _resolver: &dyn Resolver) -> String {
    if value.contains("://") {
        Link::new(value, value).to_string()
    } else {
        value.to_string()
    }
}

pub fn copyright(value: &str, _resolver: &dyn Resolver) -> String {
    value.replace("(c)", "&copy;")
}

/// The thrown type is always linked to its page.
pub fn throws(value: &str, resolver: &dyn Resolver) -> String {
    Link::new(value, resolver.resolve(value, None)).to_string()
}

/// `Entity::method` links to the method anchor on the entity page.
pub fn uses(value: &str, resolver: &dyn Resolver) -> String {
    match RE_USES_METHOD.captures(value) {
        Some(caps) => Link::new(value, resolver.resolve(&caps[1], Some(&caps[2]))).to_string(),
        None => value.to_string(),
    }
}
