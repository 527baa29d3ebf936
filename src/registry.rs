//! Entity registry — discover documentable classes from a file tree.
//!
//! Names follow the class-file convention: `classes/kohana/kodoc.php`
//! is the entity `kohana_kodoc`.

use crate::error::Result;
use crate::reflect::Reflector;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recursive listing of class files.
///
/// Entry names are root-relative paths joined with `/`, including the root
/// segment itself (`classes/kohana/kodoc.php`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    pub entries: Vec<(String, FileNode)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNode {
    File(PathBuf),
    Dir(FileTree),
}

/// Where class files live and how their names are spelled.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Root directory segment stripped from every name.
    pub segment: String,
    /// File extension without the dot.
    pub extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            segment: "classes".to_string(),
            extension: "php".to_string(),
        }
    }
}

impl FileTree {
    pub fn file(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> &mut Self {
        self.entries.push((name.into(), FileNode::File(path.into())));
        self
    }

    pub fn dir(&mut self, name: impl Into<String>, tree: FileTree) -> &mut Self {
        self.entries.push((name.into(), FileNode::Dir(tree)));
        self
    }

    /// List every class file under `root`.
    ///
    /// Files are found with a recursive glob and nested the same way the
    /// directories are, sorted for deterministic output.
    pub fn scan(root: &Path, layout: &Layout) -> Result<FileTree> {
        let pattern = format!(
            "{}/**/*.{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            layout.extension
        );
        let mut files: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        let mut tree = FileTree::default();
        for path in files {
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect();
            tree.insert(&layout.segment, &parts, path.clone());
        }
        debug!(root = %root.display(), entries = tree.entries.len(), "scanned class files");
        Ok(tree)
    }

    fn insert(&mut self, prefix: &str, parts: &[String], path: PathBuf) {
        let Some((first, rest)) = parts.split_first() else {
            return;
        };
        let name = format!("{}/{}", prefix, first);
        if rest.is_empty() {
            self.entries.push((name, FileNode::File(path)));
            return;
        }
        let position = self
            .entries
            .iter()
            .position(|(n, node)| *n == name && matches!(node, FileNode::Dir(_)));
        let index = match position {
            Some(i) => i,
            None => {
                self.entries.push((name.clone(), FileNode::Dir(FileTree::default())));
                self.entries.len() - 1
            }
        };
        if let FileNode::Dir(sub) = &mut self.entries[index].1 {
            sub.insert(&name, rest, path);
        }
    }

    fn walk<'a>(&'a self, leaves: &mut Vec<(&'a str, &'a Path)>) {
        for (name, node) in &self.entries {
            match node {
                FileNode::File(path) => leaves.push((name.as_str(), path.as_path())),
                FileNode::Dir(sub) => sub.walk(leaves),
            }
        }
    }
}

/// Canonical entity name for a file entry name.
///
/// "classes/kohana/kodoc.php" → "kohana_kodoc"
pub fn entity_name(file: &str, layout: &Layout) -> String {
    let segment = format!("{}/", layout.segment);
    let extension = format!(".{}", layout.extension);
    let name = file.strip_prefix(&segment).unwrap_or(file);
    let name = name.strip_suffix(&extension).unwrap_or(name);
    name.replace(['/', '\\'], "_").to_lowercase()
}

/// Every discovered entity name, mapped to itself. Later files win on
/// collision.
pub fn collect(tree: &FileTree, layout: &Layout) -> BTreeMap<String, String> {
    locate(tree, layout)
        .into_keys()
        .map(|name| (name.clone(), name))
        .collect()
}

/// Every discovered entity name with the file that defines it.
pub fn locate(tree: &FileTree, layout: &Layout) -> BTreeMap<String, PathBuf> {
    let mut leaves = Vec::new();
    tree.walk(&mut leaves);
    let mut found = BTreeMap::new();
    for (name, path) in leaves {
        found.insert(entity_name(name, layout), path.to_path_buf());
    }
    found
}

/// Sorted entity names for display, without `<prefix>_name` entries that
/// only extend another discovered `name`.
pub fn catalogue(classes: &BTreeMap<String, String>, prefix: &str) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    classes
        .keys()
        .filter(|name| {
            name.strip_prefix(&prefix)
                .and_then(|rest| rest.strip_prefix('_'))
                .map_or(true, |base| !classes.contains_key(base))
        })
        .cloned()
        .collect()
}

/// Sorted method names of every entity, keyed by declared name. Entities
/// whose name starts with `prefix` are skipped.
pub fn class_methods(
    reflector: &dyn Reflector,
    classes: &BTreeMap<String, String>,
    prefix: &str,
) -> Result<BTreeMap<String, Vec<String>>> {
    let prefix = prefix.to_ascii_lowercase();
    let mut out = BTreeMap::new();
    for name in classes.values() {
        let raw = reflector.reflect(name)?;
        if raw.name.to_ascii_lowercase().starts_with(&prefix) {
            continue;
        }
        let mut methods: Vec<String> = raw.methods.into_iter().map(|m| m.name).collect();
        methods.sort();
        out.insert(raw.name, methods);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KodocError;
    use crate::reflect::{RawEntity, RawMethod};

    fn sample_tree() -> FileTree {
        let mut kohana = FileTree::default();
        kohana
            .file("classes/kohana/kodoc.php", "/src/classes/kohana/kodoc.php")
            .file("classes/kohana/route.php", "/src/classes/kohana/route.php");
        let mut tree = FileTree::default();
        tree.file("classes/kodoc.php", "/src/classes/kodoc.php")
            .dir("classes/kohana", kohana)
            .file("classes/HTML.php", "/src/classes/HTML.php");
        tree
    }

    #[test]
    fn entity_name_from_path() {
        let layout = Layout::default();
        assert_eq!(entity_name("classes/kohana/kodoc.php", &layout), "kohana_kodoc");
        assert_eq!(entity_name("classes/HTML.php", &layout), "html");
        assert_eq!(entity_name("classes/a/b/c.php", &layout), "a_b_c");
    }

    #[test]
    fn collect_descends_and_maps_identity() {
        let classes = collect(&sample_tree(), &Layout::default());
        let names: Vec<&str> = classes.keys().map(String::as_str).collect();
        assert_eq!(names, ["html", "kodoc", "kohana_kodoc", "kohana_route"]);
        assert!(classes.iter().all(|(k, v)| k == v));
    }

    #[test]
    fn collect_last_write_wins() {
        let mut tree = FileTree::default();
        tree.file("classes/Foo.php", "/a/Foo.php")
            .file("classes/foo.php", "/b/foo.php");
        let found = locate(&tree, &Layout::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found["foo"], PathBuf::from("/b/foo.php"));
    }

    #[test]
    fn catalogue_drops_extensions() {
        let classes = collect(&sample_tree(), &Layout::default());
        assert_eq!(catalogue(&classes, "kohana"), ["html", "kodoc", "kohana_route"]);
    }

    #[test]
    fn catalogue_prefix_is_configurable() {
        let mut classes = BTreeMap::new();
        for name in ["kohana_foo", "foo", "app_foo"] {
            classes.insert(name.to_string(), name.to_string());
        }
        assert_eq!(catalogue(&classes, "kohana"), ["app_foo", "foo"]);
        assert_eq!(catalogue(&classes, "app"), ["foo", "kohana_foo"]);
    }

    struct Fixed;

    impl Reflector for Fixed {
        fn reflect(&self, name: &str) -> Result<RawEntity> {
            let declared = match name {
                "kohana_kodoc" => "Kohana_Kodoc",
                "kodoc" => "Kodoc",
                _ => {
                    return Err(KodocError::UnknownEntity {
                        name: name.to_string(),
                    })
                }
            };
            let method = |n: &str| RawMethod {
                name: n.to_string(),
                path: PathBuf::from("x.php"),
                comment: None,
                start: 1,
                end: 1,
            };
            Ok(RawEntity {
                name: declared.to_string(),
                path: PathBuf::from("x.php"),
                comment: None,
                parent: None,
                methods: vec![method("parse"), method("menu"), method("classes")],
            })
        }
    }

    #[test]
    fn class_methods_sorted_and_skips_prefix() {
        let mut classes = BTreeMap::new();
        for name in ["kohana_kodoc", "kodoc"] {
            classes.insert(name.to_string(), name.to_string());
        }
        let methods = class_methods(&Fixed, &classes, "kohana").unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods["Kodoc"], ["classes", "menu", "parse"]);
    }

    #[test]
    fn class_methods_propagates_errors() {
        let mut classes = BTreeMap::new();
        classes.insert("missing".to_string(), "missing".to_string());
        assert!(class_methods(&Fixed, &classes, "kohana").is_err());
    }
}
