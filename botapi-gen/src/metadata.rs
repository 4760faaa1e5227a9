//! Pre-computed metadata used throughout the code generator.
//!
//! [`Metadata::build`] indexes every declaration by name, expands named
//! unions, validates every type reference and collects the union enums that
//! have to be emitted. Field resolution afterwards cannot fail on unknown
//! names.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io;

use botapi_schema::ast::{
    Alias, Category, Declaration, Definition, Parameter, ParameterType, Type, TypeExpr,
};

use crate::grouper;
use crate::namegen as n;

/// Aliases may refer to other aliases; anything deeper is a cycle.
const MAX_ALIAS_DEPTH: usize = 16;

pub(crate) fn invalid(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

fn declare<'a>(kinds: &mut HashMap<&'a str, Kind<'a>>, name: &'a str, kind: Kind<'a>) -> io::Result<()> {
    if kinds.insert(name, kind).is_some() {
        return Err(invalid(format!("type '{name}' is declared more than once")));
    }
    Ok(())
}

/// What a type name refers to.
pub(crate) enum Kind<'a> {
    /// A concrete type, generated as a struct.
    Class,
    /// An abstract type and its inheritors, in declaration order.
    Abstract(Vec<&'a Definition>),
    /// A value enumeration.
    Enum,
    /// A named union, expanded wherever it is used.
    Alias(&'a Alias),
}

/// A type expression with named unions expanded.
struct Flat<'a> {
    /// Non-null members, in declaration order.
    members: Vec<&'a Type>,
    /// `null` is a member, or the expression was written `?T`.
    nullable: bool,
    /// The named union this expression came from, if it was exactly one.
    alias: Option<&'a str>,
}

/// A parameter or result type, resolved against the schema.
pub(crate) struct Field {
    /// Rust type of the field, e.g. `Option<Box<crate::types::Message>>`.
    pub rust: String,
    /// Builder declaration string; `None` for `any`.
    pub decl: Option<String>,
    /// Rust expression for the `&'static ArrayType` of a `Vector` field.
    pub array_type: Option<String>,
    /// `true` when `rust` is an `Option<…>`.
    pub optional: bool,
    /// Normalised JSON text of the default value.
    pub default: Option<String>,
}

pub(crate) struct Metadata<'a> {
    kinds: HashMap<&'a str, Kind<'a>>,
    /// Every concrete type definition (classes and inheritors) by struct name.
    structs: HashMap<String, &'a Definition>,
    /// Union enums to emit: named unions plus every inline `A|B` in use.
    unions: BTreeMap<String, Vec<&'a Type>>,
}

impl<'a> Metadata<'a> {
    pub(crate) fn build(decls: &'a [Declaration]) -> io::Result<Self> {
        let mut meta = Self { kinds: HashMap::new(), structs: HashMap::new(), unions: BTreeMap::new() };

        for e in grouper::enumerations(decls) {
            declare(&mut meta.kinds, &e.name, Kind::Enum)?;
        }
        for a in grouper::aliases(decls) {
            declare(&mut meta.kinds, &a.name, Kind::Alias(a))?;
        }
        for def in grouper::definitions(decls, Category::Types) {
            let Some(ty) = def.ty.single().filter(|t| !t.scalar && t.generic_arg.is_none()) else {
                return Err(invalid(format!("type '{}' must belong to a plain type name", def.name)));
            };
            if meta.structs.insert(n::def_type_name(def), def).is_some() {
                return Err(invalid(format!("type '{}' is declared more than once", def.name)));
            }
            if n::parent_name(def).is_none() {
                declare(&mut meta.kinds, &ty.name, Kind::Class)?;
            }
        }
        let mut parents: Vec<_> = grouper::inheritors_by_parent(decls).into_iter().collect();
        parents.sort_by_key(|(name, _)| *name);
        for (parent, inheritors) in parents {
            declare(&mut meta.kinds, parent, Kind::Abstract(inheritors))?;
        }
        for def in grouper::definitions(decls, Category::Methods) {
            let name = n::def_type_name(def);
            if meta.kinds.contains_key(name.as_str()) || meta.structs.contains_key(&name) {
                return Err(invalid(format!("method '{}' clashes with type '{name}'", def.name)));
            }
        }
        for name in meta.structs.keys() {
            if !matches!(meta.kinds.get(name.as_str()), None | Some(Kind::Class)) {
                return Err(invalid(format!("type '{name}' is declared more than once")));
            }
        }

        meta.validate(decls)?;
        Ok(meta)
    }

    /// Check every reference and collect union enums.
    fn validate(&mut self, decls: &'a [Declaration]) -> io::Result<()> {
        let mut found: Vec<(String, Vec<&'a Type>)> = Vec::new();

        for a in grouper::aliases(decls) {
            let flat = self.flat(&a.ty)?;
            if flat.members.len() > 1 {
                self.check_union(&flat.members)?;
                found.push((a.name.clone(), flat.members));
            }
        }

        for decl in decls {
            let Declaration::Definition(def) = decl else { continue };
            for param in &def.params {
                if let ParameterType::Normal { ty, .. } = &param.ty {
                    self.collect_unions(ty, &mut found)
                        .map_err(|e| invalid(format!("{}::{}: {e}", def.name, param.name)))?;
                }
                if let Some(lit) = &param.default {
                    let value = serde_json::from_str::<serde_json::Value>(lit).map_err(|e| {
                        invalid(format!("{}::{}: invalid default {lit}: {e}", def.name, param.name))
                    })?;
                    // An absent `None` would rebuild as the default.
                    if !value.is_null() && self.is_nullable(&param.ty)? {
                        return Err(invalid(format!(
                            "{}::{}: a nullable parameter can only default to null, not {lit}",
                            def.name, param.name
                        )));
                    }
                }
            }
            if def.category == Category::Methods {
                self.collect_unions(&def.ty, &mut found)
                    .map_err(|e| invalid(format!("{}: {e}", def.name)))?;
            }
        }

        self.unions.extend(found);
        Ok(())
    }

    fn collect_unions(&self, expr: &'a TypeExpr, found: &mut Vec<(String, Vec<&'a Type>)>) -> io::Result<()> {
        let flat = self.flat(expr)?;
        for member in &flat.members {
            self.check_known(member)?;
            if let Some(arg) = &member.generic_arg {
                self.collect_unions(arg, found)?;
            }
        }
        if flat.members.len() > 1 {
            self.check_union(&flat.members)?;
            let name = match flat.alias {
                Some(alias) => alias.to_owned(),
                None => n::union_name(&flat.members),
            };
            found.push((name, flat.members));
        } else if flat.members.is_empty() {
            return Err(invalid("a type must admit more than null"));
        }
        Ok(())
    }

    fn is_nullable(&self, ty: &'a ParameterType) -> io::Result<bool> {
        Ok(match ty {
            ParameterType::Any => false,
            ParameterType::Normal { ty, nullable } => *nullable || self.flat(ty)?.nullable,
        })
    }

    fn check_known(&self, ty: &Type) -> io::Result<()> {
        if ty.is_vector() || (ty.scalar && ty.generic_arg.is_none()) {
            return Ok(());
        }
        if ty.generic_arg.is_some() {
            return Err(invalid(format!("only Vector takes a generic argument, not '{}'", ty.name)));
        }
        match self.kinds.get(ty.name.as_str()) {
            Some(_) => Ok(()),
            None => Err(invalid(format!("unknown type '{}'", ty.name))),
        }
    }

    fn check_union(&self, members: &[&Type]) -> io::Result<()> {
        if members.iter().any(|m| m.is_vector()) {
            return Err(invalid("Vector is not allowed inside a type union"));
        }
        Ok(())
    }

    // ─── Lookups ──────────────────────────────────────────────────────────────

    /// Union enums to emit, sorted by name.
    pub(crate) fn unions(&self) -> impl Iterator<Item = (&str, &[&'a Type])> {
        self.unions.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Abstract types and their inheritors, sorted by name.
    pub(crate) fn abstracts(&self) -> Vec<(&'a str, &[&'a Definition])> {
        let mut out: Vec<_> = self
            .kinds
            .iter()
            .filter_map(|(name, kind)| match kind {
                Kind::Abstract(defs) => Some((*name, defs.as_slice())),
                _ => None,
            })
            .collect();
        out.sort_by_key(|(name, _)| *name);
        out
    }

    // ─── Resolution ───────────────────────────────────────────────────────────

    fn flat(&self, expr: &'a TypeExpr) -> io::Result<Flat<'a>> {
        let mut flat = Flat { members: Vec::new(), nullable: false, alias: None };
        self.expand(expr, &mut flat, 0)?;
        if let [only] = expr.alternatives.as_slice() {
            if let Some(Kind::Alias(a)) = self.kinds.get(only.name.as_str()) {
                let a: &'a Alias = a;
                flat.alias = Some(a.name.as_str());
            }
        }
        Ok(flat)
    }

    fn expand(&self, expr: &'a TypeExpr, flat: &mut Flat<'a>, depth: usize) -> io::Result<()> {
        if depth > MAX_ALIAS_DEPTH {
            return Err(invalid("named unions refer to each other in a cycle"));
        }
        for alt in &expr.alternatives {
            if alt.name == "null" {
                flat.nullable = true;
            } else if let Some(Kind::Alias(a)) = self.kinds.get(alt.name.as_str()) {
                let a: &'a Alias = a;
                self.expand(&a.ty, flat, depth + 1)?;
            } else if !flat.members.iter().any(|m| *m == alt) {
                flat.members.push(alt);
            }
        }
        Ok(())
    }

    /// Rust path of a single, non-vector member type.
    pub(crate) fn member_path(&self, ty: &Type) -> String {
        if let Some(b) = n::builtin_type(&ty.name) {
            return b.to_owned();
        }
        match self.kinds.get(ty.name.as_str()) {
            Some(Kind::Class) => format!("crate::types::{}", ty.name),
            _ => format!("crate::enums::{}", ty.name),
        }
    }

    fn rust_type(&self, flat: &Flat<'a>, owner: Option<&str>) -> io::Result<String> {
        let path = match flat.members.as_slice() {
            [] => return Err(invalid("a type must admit more than null")),
            [only] if only.is_vector() => {
                let elem = self.element(only)?;
                let inner = self.rust_type(&elem, None)?;
                return Ok(if elem.nullable { format!("Vec<Option<{inner}>>") } else { format!("Vec<{inner}>") });
            }
            [only] => self.member_path(only),
            members => {
                let name = match flat.alias {
                    Some(alias) => alias.to_owned(),
                    None => n::union_name(members),
                };
                format!("crate::unions::{name}")
            }
        };

        let boxed = owner.is_some_and(|owner| {
            flat.members.iter().any(|m| m.name == owner || self.reaches(&m.name, owner, &mut HashSet::new()))
        });
        Ok(if boxed { format!("Box<{path}>") } else { path })
    }

    fn element(&self, vector: &'a Type) -> io::Result<Flat<'a>> {
        match &vector.generic_arg {
            Some(arg) => self.flat(arg),
            None => Err(invalid("Vector without an element type")),
        }
    }

    fn decl(flat: &Flat<'a>) -> String {
        let body = match flat.members.as_slice() {
            [only] if only.is_vector() => "array".to_owned(),
            members => members.iter().map(|m| m.name.as_str()).collect::<Vec<_>>().join("|"),
        };
        if flat.nullable { format!("?{body}") } else { body }
    }

    fn array_type(&self, flat: &Flat<'a>) -> io::Result<Option<String>> {
        let [only] = flat.members.as_slice() else { return Ok(None) };
        if !only.is_vector() {
            return Ok(None);
        }
        let elem = self.element(only)?;
        let rendered = match self.array_type(&elem)? {
            Some(inner) => format!("&botapi_builder::ArrayType::Nested({inner})"),
            None => format!("&botapi_builder::ArrayType::Element({:?})", Self::decl(&elem)),
        };
        Ok(Some(rendered))
    }

    /// Resolve a parameter of the type or method `owner`.
    pub(crate) fn resolve_param(&self, owner: &Definition, param: &'a Parameter) -> io::Result<Field> {
        let default = match &param.default {
            Some(lit) => Some(
                serde_json::from_str::<serde_json::Value>(lit)
                    .map_err(|e| invalid(format!("{}::{}: {e}", owner.name, param.name)))?,
            ),
            None => None,
        };
        let null_default = default.as_ref().is_some_and(serde_json::Value::is_null);
        let default = default.map(|v| v.to_string());

        let ty = match &param.ty {
            ParameterType::Any => {
                return Ok(Field {
                    rust: "serde_json::Value".into(),
                    decl: None,
                    array_type: None,
                    optional: false,
                    default,
                });
            }
            ParameterType::Normal { ty, nullable } => {
                let mut flat = self.flat(ty)?;
                flat.nullable |= *nullable || null_default;
                flat
            }
        };

        let owner_name = n::def_type_name(owner);
        let owner = (owner.category == Category::Types).then_some(owner_name.as_str());
        let inner = self.rust_type(&ty, owner)?;
        let optional = ty.nullable;

        Ok(Field {
            rust: if optional { format!("Option<{inner}>") } else { inner },
            decl: Some(Self::decl(&ty)),
            array_type: self.array_type(&ty)?,
            optional,
            default,
        })
    }

    /// Resolve the result type of a method.
    pub(crate) fn resolve_return(&self, def: &'a Definition) -> io::Result<Field> {
        let ty = self.flat(&def.ty)?;
        let inner = self.rust_type(&ty, None)?;
        Ok(Field {
            rust: if ty.nullable { format!("Option<{inner}>") } else { inner },
            decl: Some(Self::decl(&ty)),
            array_type: self.array_type(&ty)?,
            optional: ty.nullable,
            default: None,
        })
    }

    // ─── Recursion ────────────────────────────────────────────────────────────

    /// Types stored inline (not behind a `Vec`) in a value of `name`.
    fn inline_edges(&self, name: &str) -> Vec<String> {
        if let Some(def) = self.structs.get(name) {
            return def
                .params
                .iter()
                .filter_map(|p| match &p.ty {
                    ParameterType::Normal { ty, .. } => self.flat(ty).ok(),
                    ParameterType::Any => None,
                })
                .flat_map(|flat| flat.members)
                .filter(|m| !m.is_vector() && !m.scalar)
                .map(|m| m.name.clone())
                .collect();
        }
        match self.kinds.get(name) {
            Some(Kind::Abstract(defs)) => defs.iter().map(|d| n::def_type_name(d)).collect(),
            _ => Vec::new(),
        }
    }

    /// `true` if a value of type `from` can contain a `target` inline.
    pub(crate) fn reaches(&self, from: &str, target: &str, visited: &mut HashSet<String>) -> bool {
        if !visited.insert(from.to_owned()) {
            return false;
        }
        self.inline_edges(from)
            .into_iter()
            .any(|next| next == target || self.reaches(&next, target, visited))
    }
}
