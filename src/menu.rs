//! Navigation menu — entities grouped by `@package` and `@category`.

use crate::entity;
use crate::error::Result;
use crate::model::{Entity, Link, MenuTree};
use crate::parser::ParseContext;
use crate::reflect::Reflector;
use crate::registry;
use crate::resolver::Resolver;
use std::collections::BTreeMap;

/// Package for entities without a `@package` tag.
pub const UNKNOWN_PACKAGE: &str = "Unknown";
/// Category for entities without a `@package` tag.
pub const BASE_CATEGORY: &str = "Base";
/// Category for packaged entities without a `@category` tag.
pub const CORE_CATEGORY: &str = "Core";

/// Group entity links into packages and categories.
///
/// Packages come out sorted; categories keep the order they were first seen
/// in, walking entities by ascending lowercase name.
pub fn build(entities: &[Entity], resolver: &dyn Resolver) -> MenuTree {
    let mut sorted: Vec<&Entity> = entities.iter().collect();
    sorted.sort_by_cached_key(|e| e.name.to_lowercase());

    let mut menu = MenuTree::default();
    for entity in sorted {
        let link = Link::new(&entity.name, resolver.resolve(&entity.name, None));

        let Some(packages) = entity.tags.get("package") else {
            menu.push(UNKNOWN_PACKAGE, BASE_CATEGORY, link);
            continue;
        };
        for package in packages {
            match entity.tags.get("category") {
                Some(categories) => {
                    for category in categories {
                        menu.push(package, category, link.clone());
                    }
                }
                None => menu.push(package, CORE_CATEGORY, link.clone()),
            }
        }
    }
    menu
}

/// Build the menu from the class comments of every displayable entity.
///
/// `<prefix>_name` extensions of another discovered entity are left out.
/// Method doc blocks are not read.
pub fn menu(
    reflector: &dyn Reflector,
    classes: &BTreeMap<String, String>,
    prefix: &str,
    ctx: &ParseContext,
) -> Result<MenuTree> {
    let entities = registry::catalogue(classes, prefix)
        .iter()
        .map(|name| entity::summary(reflector, name, ctx))
        .collect::<Result<Vec<_>>>()?;
    Ok(build(&entities, ctx.resolver))
}
