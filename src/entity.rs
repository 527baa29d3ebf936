//! Entity documentation — reflect a class and parse its doc comments.

use crate::error::{KodocError, Result};
use crate::model::{Entity, MethodDoc, ParsedComment, SourceRange};
use crate::parser::{self, ParseContext};
use crate::reflect::Reflector;
use crate::source;
use tracing::{debug, warn};

/// Build the documentation for entity `name`.
pub fn factory(reflector: &dyn Reflector, name: &str, ctx: &ParseContext) -> Result<Entity> {
    let raw = reflector.reflect(name)?;
    let class = parse_optional(raw.comment.as_deref(), ctx)?;

    let mut methods = Vec::with_capacity(raw.methods.len());
    for method in raw.methods {
        let parsed = parse_optional(method.comment.as_deref(), ctx)?;
        let range = SourceRange {
            path: method.path,
            start: method.start,
            end: method.end,
        };
        let source = match source::extract(&range.path, range.start, range.end) {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(KodocError::NoFile) => None,
            Err(e) => {
                warn!(entity = %raw.name, method = %method.name, error = %e, "source unavailable");
                None
            }
        };
        methods.push(MethodDoc {
            name: method.name,
            description: parsed.description,
            tags: parsed.tags,
            range,
            source,
        });
    }
    methods.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(entity = %raw.name, methods = methods.len(), "documented");
    Ok(Entity {
        name: raw.name,
        description: class.description,
        tags: class.tags,
        methods,
    })
}

/// Class-level documentation of entity `name` without its methods.
///
/// Method doc blocks are never parsed, so a malformed one does not fail.
pub fn summary(reflector: &dyn Reflector, name: &str, ctx: &ParseContext) -> Result<Entity> {
    let raw = reflector.reflect(name)?;
    let class = parse_optional(raw.comment.as_deref(), ctx)?;
    Ok(Entity {
        name: raw.name,
        description: class.description,
        tags: class.tags,
        methods: Vec::new(),
    })
}

fn parse_optional(comment: Option<&str>, ctx: &ParseContext) -> Result<ParsedComment> {
    match comment {
        Some(text) => parser::parse(text, ctx),
        None => Ok(ParsedComment::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::PlainFormatter;
    use crate::parser::TagTransforms;
    use crate::reflect::{RawEntity, RawMethod};
    use crate::resolver::RouteResolver;
    use std::path::PathBuf;

    struct InMemory(RawEntity);

    impl Reflector for InMemory {
        fn reflect(&self, _name: &str) -> Result<RawEntity> {
            Ok(self.0.clone())
        }
    }

    type Build = fn(&dyn Reflector, &str, &ParseContext) -> Result<Entity>;

    fn run(build: Build, raw: RawEntity) -> Result<Entity> {
        let resolver = RouteResolver::new("/docs/api");
        let transforms = TagTransforms::default();
        let ctx = ParseContext {
            resolver: &resolver,
            formatter: &PlainFormatter,
            transforms: &transforms,
        };
        build(&InMemory(raw), "whatever", &ctx)
    }

    fn document(raw: RawEntity) -> Result<Entity> {
        run(factory, raw)
    }

    fn method(name: &str, comment: Option<&str>) -> RawMethod {
        RawMethod {
            name: name.to_string(),
            path: PathBuf::new(),
            comment: comment.map(str::to_string),
            start: 1,
            end: 2,
        }
    }

    #[test]
    fn parses_class_and_method_comments() {
        let entity = document(RawEntity {
            name: "Kodoc".to_string(),
            path: PathBuf::new(),
            parent: None,
            comment: Some("/**\n * Docs.\n * @package Kohana\n */".to_string()),
            methods: vec![
                method("parse", Some("/**\n * Parse it.\n * @uses Route::get\n */")),
                method("menu", None),
            ],
        })
        .unwrap();

        assert_eq!(entity.name, "Kodoc");
        assert_eq!(entity.description, "Docs.");
        assert_eq!(entity.tags.get("package").unwrap(), ["Kohana"]);
        assert_eq!(entity.method_names(), ["menu", "parse"]);
        assert_eq!(entity.methods[1].description, "Parse it.");
        assert_eq!(
            entity.methods[1].tags.get("uses").unwrap(),
            ["<a href=\"/docs/api/Route#get\">Route::get</a>"]
        );
        // No path means no source, not a failure.
        assert!(entity.methods[0].source.is_none());
    }

    #[test]
    fn undocumented_class_has_empty_docs() {
        let entity = document(RawEntity {
            name: "Bare".to_string(),
            path: PathBuf::new(),
            comment: None,
            parent: None,
            methods: Vec::new(),
        })
        .unwrap();
        assert!(entity.description.is_empty());
        assert!(entity.tags.is_empty());
    }

    #[test]
    fn malformed_method_comment_propagates() {
        let err = document(RawEntity {
            name: "Broken".to_string(),
            path: PathBuf::new(),
            comment: None,
            parent: None,
            methods: vec![method("x", Some("/** @var int */"))],
        })
        .unwrap_err();
        assert!(matches!(err, KodocError::MalformedComment { lines: 1 }));
    }

    #[test]
    fn summary_skips_method_comments() {
        let entity = run(
            summary,
            RawEntity {
                name: "Broken".to_string(),
                path: PathBuf::new(),
                comment: Some("/**\n * Has a bad method.\n * @package Kohana\n */".to_string()),
                parent: None,
                methods: vec![method("x", Some("/** @return int */"))],
            },
        )
        .unwrap();
        assert_eq!(entity.description, "Has a bad method.");
        assert_eq!(entity.tags.get("package").unwrap(), ["Kohana"]);
        assert!(entity.methods.is_empty());
    }

    #[test]
    fn method_source_comes_from_its_own_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let parent = dir.path().join("base.php");
        std::fs::write(&parent, "<?php\n\tfunction run()\n\t{\n\t}\n").unwrap();
        let mut inherited = method("run", None);
        inherited.path = parent.clone();
        inherited.start = 2;
        inherited.end = 4;

        let entity = document(RawEntity {
            name: "Child".to_string(),
            path: dir.path().join("child.php"),
            comment: None,
            parent: Some("Base".to_string()),
            methods: vec![inherited],
        })
        .unwrap();
        assert_eq!(entity.methods[0].range.path, parent);
        assert_eq!(entity.methods[0].source.as_deref(), Some("function run()\n{\n}"));
    }
}
