//! Cross-reference links to entity documentation pages.

/// Builds the canonical link to an entity's documentation page.
pub trait Resolver {
    /// Link to `entity`, optionally pointing at a member anchor on that page.
    fn resolve(&self, entity: &str, anchor: Option<&str>) -> String;
}

/// Resolves entities beneath a fixed route prefix, e.g. `/guide/api/Foo#bar`.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    base: String,
}

impl RouteResolver {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for RouteResolver {
    fn default() -> Self {
        Self::new("/guide/api")
    }
}

impl Resolver for RouteResolver {
    fn resolve(&self, entity: &str, anchor: Option<&str>) -> String {
        match anchor {
            Some(member) => format!("{}/{}#{}", self.base, entity, member),
            None => format!("{}/{}", self.base, entity),
        }
    }
}
