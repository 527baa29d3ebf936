//! Static class reflection — doc comments and methods read from source text.
//!
//! A line-by-line scanner over PHP-style class files:
//! - the `/** ... */` block right before `class Name` → class comment
//! - `function name(` inside the class body → method, with the doc block
//!   right before it and its line range (declaration through closing brace)
//! - `extends Parent` → methods inherited from `Parent` when it is part of
//!   the same tree

use crate::error::{KodocError, Result};
use crate::registry::{self, FileTree, Layout};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static RE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?:abstract|final)\s+)*(?:class|interface|trait)\s+(\w+)(?:\s+extends\s+(\w+))?",
    )
    .unwrap()
});

static RE_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?:public|protected|private|static|abstract|final)\s+)*function\s+&?\s*(\w+)\s*\(",
    )
    .unwrap()
});

/// Class as declared in source, before any comment parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntity {
    /// Declared class name, e.g. `Kohana_Kodoc`.
    pub name: String,
    pub path: PathBuf,
    /// Full doc block including delimiters.
    pub comment: Option<String>,
    /// Declared parent class, as written after `extends`.
    pub parent: Option<String>,
    /// Declared methods in declaration order, then inherited ones.
    pub methods: Vec<RawMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMethod {
    pub name: String,
    /// File the method is declared in; differs from the entity's for
    /// inherited methods.
    pub path: PathBuf,
    pub comment: Option<String>,
    /// 1-indexed inclusive line range of the declaration and body.
    pub start: usize,
    pub end: usize,
}

/// Looks up an entity's doc comment and methods by canonical name.
pub trait Reflector {
    fn reflect(&self, name: &str) -> Result<RawEntity>;
}

/// Reflector reading class files discovered by the registry.
#[derive(Debug, Clone, Default)]
pub struct SourceReflector {
    files: BTreeMap<String, PathBuf>,
}

impl SourceReflector {
    pub fn new(tree: &FileTree, layout: &Layout) -> Self {
        Self {
            files: registry::locate(tree, layout),
        }
    }

    pub fn from_files(files: BTreeMap<String, PathBuf>) -> Self {
        Self { files }
    }
}

impl SourceReflector {
    fn read(&self, name: &str) -> Result<RawEntity> {
        let key = name.to_lowercase();
        let path = self
            .files
            .get(&key)
            .ok_or_else(|| KodocError::UnknownEntity {
                name: name.to_string(),
            })?;
        let content = fs::read_to_string(path).map_err(|e| KodocError::io(path, e))?;
        scan(&key, path, &content)
    }

    /// Append the methods of `raw`'s ancestors that it does not redeclare.
    fn inherit(&self, raw: &mut RawEntity, seen: &mut HashSet<String>) -> Result<()> {
        let Some(parent) = raw.parent.clone() else {
            return Ok(());
        };
        if !seen.insert(parent.to_lowercase()) {
            return Ok(());
        }
        let mut base = match self.read(&parent) {
            Ok(base) => base,
            Err(KodocError::UnknownEntity { .. }) => {
                debug!(entity = %raw.name, parent = %parent, "parent outside tree");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        self.inherit(&mut base, seen)?;

        let declared: HashSet<String> =
            raw.methods.iter().map(|m| m.name.to_lowercase()).collect();
        raw.methods.extend(
            base.methods
                .into_iter()
                .filter(|m| !declared.contains(&m.name.to_lowercase())),
        );
        Ok(())
    }
}

impl Reflector for SourceReflector {
    fn reflect(&self, name: &str) -> Result<RawEntity> {
        let mut raw = self.read(name)?;
        let mut seen = HashSet::from([name.to_lowercase()]);
        self.inherit(&mut raw, &mut seen)?;
        debug!(entity = %raw.name, methods = raw.methods.len(), "reflected");
        Ok(raw)
    }
}

/// Method being scanned until its closing brace.
struct OpenMethod {
    method: RawMethod,
    base_depth: i64,
    opened: bool,
}

/// Scan class source text for the class comment and its methods.
///
/// Fails with `EmptyEntity` when the text declares no class.
pub fn scan(name: &str, path: &Path, content: &str) -> Result<RawEntity> {
    let empty = || KodocError::EmptyEntity {
        name: name.to_string(),
        path: path.to_path_buf(),
    };
    if content.trim().is_empty() {
        return Err(empty());
    }

    let mut entity: Option<RawEntity> = None;
    let mut class_depth = 0i64;
    let mut depth = 0i64;
    let mut pending: Option<String> = None;
    let mut comment: Option<Vec<&str>> = None;
    let mut open: Option<OpenMethod> = None;
    let mut in_block = false;

    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = line.trim();

        if let Some(ref mut lines) = comment {
            lines.push(line);
            if trimmed.contains("*/") {
                pending = comment.take().map(|lines| lines.join("\n"));
            }
            continue;
        }

        if let Some(mut current) = open.take() {
            let (opens, closes) = count_braces(line, &mut in_block);
            depth += opens - closes;
            current.opened |= opens > 0;
            if current.opened && depth <= current.base_depth {
                current.method.end = lineno;
                push_method(&mut entity, current.method);
            } else {
                open = Some(current);
            }
            continue;
        }

        if !in_block && trimmed.starts_with("/**") {
            if trimmed.contains("*/") {
                pending = Some(trimmed.to_string());
            } else {
                comment = Some(vec![line]);
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let in_block_before = in_block;
        let (opens, closes) = count_braces(line, &mut in_block);

        if in_block_before {
            depth += opens - closes;
            continue;
        }
        if entity.is_none() {
            if let Some(caps) = RE_CLASS.captures(line) {
                entity = Some(RawEntity {
                    name: caps[1].to_string(),
                    path: path.to_path_buf(),
                    comment: pending.take(),
                    parent: caps.get(2).map(|m| m.as_str().to_string()),
                    methods: Vec::new(),
                });
                class_depth = depth;
            }
        } else if depth == class_depth + 1 {
            if let Some(caps) = RE_METHOD.captures(line) {
                let mut current = OpenMethod {
                    method: RawMethod {
                        name: caps[1].to_string(),
                        path: path.to_path_buf(),
                        comment: pending.take(),
                        start: lineno,
                        end: lineno,
                    },
                    base_depth: depth,
                    opened: opens > 0,
                };
                depth += opens - closes;
                let bodiless = opens == 0 && trimmed.ends_with(';');
                if bodiless || (current.opened && depth <= current.base_depth) {
                    current.method.end = lineno;
                    push_method(&mut entity, current.method);
                } else {
                    open = Some(current);
                }
                continue;
            }
        }

        if !is_comment(trimmed) {
            pending = None;
        }
        depth += opens - closes;
    }

    if let Some(current) = open {
        // Unterminated body runs to the end of the file.
        let mut method = current.method;
        method.end = content.lines().count();
        push_method(&mut entity, method);
    }

    entity.ok_or_else(empty)
}

fn push_method(entity: &mut Option<RawEntity>, method: RawMethod) {
    if let Some(e) = entity {
        e.methods.push(method);
    }
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//")
        || trimmed.starts_with('*')
        || (trimmed.starts_with('#') && !trimmed.starts_with("#["))
}

/// Count `{` and `}` outside string literals and comments. `in_block`
/// carries an open `/* ... */` comment from one line to the next.
fn count_braces(line: &str, in_block: &mut bool) -> (i64, i64) {
    let mut opens = 0;
    let mut closes = 0;
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if *in_block {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block = false;
            }
            continue;
        }
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '{' => opens += 1,
                '}' => closes += 1,
                '#' => break,
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    *in_block = true;
                }
                _ => {}
            },
        }
    }
    (opens, closes)
}
