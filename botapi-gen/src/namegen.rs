//! Functions that convert schema names to idiomatic Rust identifiers.

use botapi_schema::ast::{Definition, Parameter, Type};

// ─── scalar → Rust type ──────────────────────────────────────────────────────

/// Map a schema scalar name to a Rust type string, if applicable.
pub(crate) fn builtin_type(name: &str) -> Option<&'static str> {
    Some(match name {
        "int" => "i64",
        "float" | "double" => "f64",
        "string" => "String",
        "bool" => "bool",
        "array" => "serde_json::Value",
        _ => return None,
    })
}

/// Variant name used for a scalar member of a union enum.
pub(crate) fn builtin_variant(name: &str) -> Option<&'static str> {
    Some(match name {
        "int" => "Int",
        "float" | "double" => "Float",
        "string" => "String",
        "bool" => "Bool",
        "array" => "Array",
        _ => return None,
    })
}

// ─── Case conversion ─────────────────────────────────────────────────────────

/// Converts `some_ok_name` or `SomeOKName` into `SomeOkName` (PascalCase).
pub(crate) fn to_pascal(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut next_upper = true;
    let mut prev_upper = false;

    for ch in name.chars() {
        if ch == '_' {
            next_upper = true;
            prev_upper = false;
            continue;
        }
        if next_upper {
            out.push(ch.to_ascii_uppercase());
            next_upper = false;
            prev_upper = ch.is_ascii_uppercase();
        } else if ch.is_ascii_uppercase() {
            // Inside a cap-run ("OK", "HTML") only the first letter stays upper.
            if prev_upper {
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
            prev_upper = true;
        } else {
            out.push(ch);
            prev_upper = false;
        }
    }
    out
}

/// Converts `ChatMemberOwner` into `CHAT_MEMBER_OWNER`.
pub(crate) fn to_upper_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        out.push(ch.to_ascii_uppercase());
    }
    out
}

// ─── Definition helpers ──────────────────────────────────────────────────────

/// `struct` name (and registry name) for a definition.
pub(crate) fn def_type_name(def: &Definition) -> String {
    to_pascal(&def.name)
}

/// The abstract type a type definition inherits from, if any.
///
/// `chatMemberOwner … = ChatMember` inherits from `ChatMember`;
/// `user … = User` is a plain class.
pub(crate) fn parent_name(def: &Definition) -> Option<&str> {
    let parent = def.ty.single()?;
    if parent.scalar || parent.generic_arg.is_some() || def_type_name(def) == parent.name {
        None
    } else {
        Some(&parent.name)
    }
}

/// Name of the registry `static` holding a type's entry.
pub(crate) fn static_name(type_name: &str) -> String {
    to_upper_snake(type_name)
}

/// Name of the registry `static` holding a method's entry.
pub(crate) fn method_static_name(def: &Definition) -> String {
    format!("METHOD_{}", to_upper_snake(&def_type_name(def)))
}

/// Enum variant name of an inheritor (strips the abstract type prefix).
pub(crate) fn def_variant_name(def: &Definition, parent: &str) -> String {
    let full = def_type_name(def);
    match full.strip_prefix(parent) {
        Some(v) if v == "Self" => full,
        Some(v) if v.starts_with(|c: char| c.is_ascii_uppercase()) => v.to_owned(),
        _ => full,
    }
}

// ─── Type helpers ────────────────────────────────────────────────────────────

/// Name of the enum generated for an inline union such as `Message|bool`.
pub(crate) fn union_name(members: &[&Type]) -> String {
    members
        .iter()
        .map(|t| to_pascal(&t.name))
        .collect::<Vec<_>>()
        .join("Or")
}

/// Variant name for one member of a union enum.
pub(crate) fn union_variant_name(member: &Type) -> String {
    match builtin_variant(&member.name) {
        Some(v) => v.to_owned(),
        None => to_pascal(&member.name),
    }
}

/// Variant name for one member of a value enum.
pub(crate) fn enum_member_name(name: &str) -> String {
    let pascal = to_pascal(name);
    if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{pascal}")
    } else {
        pascal
    }
}

// ─── Parameter helpers ───────────────────────────────────────────────────────

/// The Rust field name for a parameter (handles reserved keywords).
pub(crate) fn param_attr_name(param: &Parameter) -> String {
    match param.name.as_str() {
        "type" => "r#type".into(),
        "final" => "r#final".into(),
        "loop" => "r#loop".into(),
        "match" => "r#match".into(),
        "move" => "r#move".into(),
        "ref" => "r#ref".into(),
        "static" => "r#static".into(),
        "use" => "r#use".into(),
        "gen" => "r#gen".into(),
        "self" => "is_self".into(),
        other => other.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_basic() {
        assert_eq!(to_pascal("chat_member"), "ChatMember");
        assert_eq!(to_pascal("inlineKeyboardButton"), "InlineKeyboardButton");
        assert_eq!(to_pascal("some_OK_name"), "SomeOkName");
        assert_eq!(to_pascal("HTML"), "Html");
        assert_eq!(to_pascal("MarkdownV2"), "MarkdownV2");
    }

    #[test]
    fn upper_snake() {
        assert_eq!(to_upper_snake("ChatMemberOwner"), "CHAT_MEMBER_OWNER");
        assert_eq!(to_upper_snake("User"), "USER");
        assert_eq!(to_upper_snake("PhotoSize2"), "PHOTO_SIZE2");
    }

    #[test]
    fn variant_names_strip_parent() {
        let def: Definition = "chatMemberOwner status:string = ChatMember".parse().unwrap();
        assert_eq!(def_variant_name(&def, "ChatMember"), "Owner");
        assert_eq!(def_variant_name(&def, "Message"), "ChatMemberOwner");
        assert_eq!(parent_name(&def), Some("ChatMember"));

        let def: Definition = "user id:int = User".parse().unwrap();
        assert_eq!(parent_name(&def), None);
    }

    #[test]
    fn union_names() {
        let a: Type = "Message".parse().unwrap();
        let b: Type = "bool".parse().unwrap();
        assert_eq!(union_name(&[&a, &b]), "MessageOrBool");
        assert_eq!(union_variant_name(&b), "Bool");
    }

    #[test]
    fn keywords_are_escaped() {
        let p: Parameter = "type:string".parse().unwrap();
        assert_eq!(param_attr_name(&p), "r#type");
    }
}
