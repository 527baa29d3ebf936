//! Doc comment parser — splits a `/** ... */` block into body and tags.

pub mod transform;

use crate::error::{KodocError, Result};
use crate::markup::MarkupFormatter;
use crate::model::{ParsedComment, TagMap};
use crate::resolver::Resolver;
use regex::Regex;
use std::sync::LazyLock;

pub use transform::TagTransforms;

// Leading indentation plus an optional `* ` comment marker
static RE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(?:\* ?)?").unwrap());

// `@name` optionally followed by whitespace and the tag text. Whitespace
// after the name is a separator only, so `@return ` has an empty value
// like `@return`.
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(\S+)(?:\s+(.*))?$").unwrap());

/// Collaborators needed to turn raw comments into display values.
pub struct ParseContext<'a> {
    pub resolver: &'a dyn Resolver,
    pub formatter: &'a dyn MarkupFormatter,
    pub transforms: &'a TagTransforms,
}

/// Parse a raw comment block, including its delimiter lines.
pub fn parse(comment: &str, ctx: &ParseContext) -> Result<ParsedComment> {
    let normalized = comment.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    if lines.len() < 2 {
        return Err(KodocError::MalformedComment { lines: lines.len() });
    }

    let mut body: Vec<&str> = Vec::new();
    let mut tags = TagMap::new();

    for line in &lines[1..lines.len() - 1] {
        let line = strip_marker(line);
        match split_tag(line) {
            Some((name, text)) => {
                let value = ctx.transforms.apply(name, text, ctx.resolver);
                tags.push(name, value);
            }
            None => body.push(line),
        }
    }

    let text = body.join("\n");
    let text = text.trim();
    let description = if text.is_empty() {
        String::new()
    } else {
        ctx.formatter.format(text)
    };

    Ok(ParsedComment { description, tags })
}

/// Remove indentation and the `*` marker from one comment line.
pub fn strip_marker(line: &str) -> &str {
    match RE_MARKER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Split a stripped line into tag name and text, if it is a tag line.
pub fn split_tag(line: &str) -> Option<(&str, &str)> {
    let caps = RE_TAG.captures(line)?;
    let name = caps.get(1)?.as_str();
    let text = caps.get(2).map_or("", |m| m.as_str());
    Some((name, text))
}
