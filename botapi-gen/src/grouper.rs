//! Groups declarations by kind for organised code output.

use std::collections::HashMap;

use botapi_schema::ast::{Alias, Category, Declaration, Definition, Enumeration};

use crate::namegen as n;

/// Definitions of `category`, sorted by name for deterministic output.
pub(crate) fn definitions(decls: &[Declaration], category: Category) -> Vec<&Definition> {
    let mut out: Vec<&Definition> = decls
        .iter()
        .filter_map(|d| match d {
            Declaration::Definition(def) if def.category == category => Some(def),
            _ => None,
        })
        .collect();
    out.sort_by_key(|d| n::def_type_name(d));
    out
}

/// Value enumerations, sorted by name.
pub(crate) fn enumerations(decls: &[Declaration]) -> Vec<&Enumeration> {
    let mut out: Vec<&Enumeration> = decls
        .iter()
        .filter_map(|d| match d {
            Declaration::Enum(e) => Some(e),
            _ => None,
        })
        .collect();
    out.sort_by_key(|e| &e.name);
    out
}

/// Named unions, in declaration order.
pub(crate) fn aliases(decls: &[Declaration]) -> Vec<&Alias> {
    decls
        .iter()
        .filter_map(|d| match d {
            Declaration::Alias(a) => Some(a),
            _ => None,
        })
        .collect()
}

/// Group inheritor definitions by the abstract type they belong to.
///
/// Unlike every other grouping, inheritors keep their **declaration order**:
/// it is the order in which the builder tries them.
pub(crate) fn inheritors_by_parent(decls: &[Declaration]) -> HashMap<&str, Vec<&Definition>> {
    let mut map: HashMap<&str, Vec<&Definition>> = HashMap::new();
    for decl in decls {
        let Declaration::Definition(def) = decl else { continue };
        if def.category != Category::Types {
            continue;
        }
        if let Some(parent) = n::parent_name(def) {
            map.entry(parent).or_default().push(def);
        }
    }
    map
}
