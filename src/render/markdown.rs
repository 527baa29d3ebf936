//! Markdown renderer for the menu and entity pages.
//!
//! Descriptions are already formatted by the markup formatter and are
//! emitted verbatim; tag values may carry inline HTML links.

use crate::error::Result;
use crate::model::{Entity, MenuTree, MethodDoc, TagMap};
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render_menu(&self, menu: &MenuTree) -> Result<String> {
        let mut out = String::new();
        for (package, categories) in &menu.packages {
            out.push_str(&format!("## {}\n\n", package));
            for category in categories {
                out.push_str(&format!("### {}\n\n", category.name));
                for link in &category.links {
                    out.push_str(&format!("* [{}]({})\n", link.text, link.target));
                }
                out.push('\n');
            }
        }
        Ok(out)
    }

    fn render_entity(&self, entity: &Entity) -> Result<String> {
        let mut lines: Vec<String> = vec![format!("# {}\n", entity.name)];

        if !entity.description.is_empty() {
            lines.push(entity.description.trim_end().to_string());
            lines.push(String::new());
        }
        push_tags(&mut lines, &entity.tags);

        if !entity.methods.is_empty() {
            lines.push("## Methods\n".to_string());
            for method in &entity.methods {
                lines.push(format!("* [{}](#{})", method.name, method.name.to_lowercase()));
            }
            lines.push(String::new());
            for method in &entity.methods {
                render_method(&mut lines, method);
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_method(lines: &mut Vec<String>, method: &MethodDoc) {
    lines.push(format!("### {}\n", method.name));
    if !method.description.is_empty() {
        lines.push(method.description.trim_end().to_string());
        lines.push(String::new());
    }
    push_tags(lines, &method.tags);
    if let Some(ref source) = method.source {
        lines.push("```php".to_string());
        lines.push(source.clone());
        lines.push("```".to_string());
        lines.push(String::new());
    }
}

fn push_tags(lines: &mut Vec<String>, tags: &TagMap) {
    if tags.is_empty() {
        return;
    }
    for (name, values) in tags.iter() {
        for value in values {
            if value.is_empty() {
                lines.push(format!("* **{}**", name));
            } else {
                lines.push(format!("* **{}** {}", name, value));
            }
        }
    }
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, SourceRange};
    use std::path::PathBuf;

    #[test]
    fn menu_sections() {
        let mut menu = MenuTree::default();
        menu.push("Kohana", "Helpers", Link::new("Arr", "/api/Arr"));
        menu.push("Kohana", "Helpers", Link::new("Date", "/api/Date"));
        menu.push("Unknown", "Base", Link::new("Loose", "/api/Loose"));
        let out = MarkdownRenderer.render_menu(&menu).unwrap();
        assert_eq!(
            out,
            "## Kohana\n\n### Helpers\n\n* [Arr](/api/Arr)\n* [Date](/api/Date)\n\n\
             ## Unknown\n\n### Base\n\n* [Loose](/api/Loose)\n\n"
        );
    }

    #[test]
    fn entity_page() {
        let mut tags = TagMap::new();
        tags.push("package", "Kohana");
        let mut method_tags = TagMap::new();
        method_tags.push("return", "");
        let entity = Entity {
            name: "Arr".to_string(),
            description: "Array helper.".to_string(),
            tags,
            methods: vec![MethodDoc {
                name: "get".to_string(),
                description: String::new(),
                tags: method_tags,
                range: SourceRange {
                    path: PathBuf::from("arr.php"),
                    start: 3,
                    end: 4,
                },
                source: Some("function get()\n{}".to_string()),
            }],
        };
        let out = MarkdownRenderer.render_entity(&entity).unwrap();
        assert_eq!(
            out,
            "# Arr\n\nArray helper.\n\n* **package** Kohana\n\n## Methods\n\n* [get](#get)\n\n\
             ### get\n\n* **return**\n\n```php\nfunction get()\n{}\n```\n\n"
        );
    }
}
