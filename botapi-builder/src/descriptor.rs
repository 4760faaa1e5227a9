//! Static type descriptors and the registry that looks them up.
//!
//! Every buildable type is described by one [`TypeEntry`] stored in a
//! `static`. Entries are immutable and shared freely between threads.

use std::fmt;

use serde_json::Value;

use crate::checker::Checker;
use crate::convert::FromBuilt;
use crate::error::{BuildError, Result};
use crate::value::{Built, Instance, Object};

// ─── Literal ─────────────────────────────────────────────────────────────────

/// A JSON scalar usable in `static` descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string.
    Str(&'static str),
}

impl Literal {
    /// `true` if `raw` is exactly this scalar (no coercion).
    pub fn matches(&self, raw: &Value) -> bool {
        match (self, raw) {
            (Self::Null, Value::Null) => true,
            (Self::Bool(a), Value::Bool(b)) => a == b,
            (Self::Int(a), Value::Number(n)) => n.as_i64() == Some(*a),
            (Self::Str(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    /// The literal as a raw value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::from(*n),
            Self::Str(s) => Value::from(*s),
        }
    }
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// Element type of an `array` parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayType {
    /// Rows are built against this type string (name or `A|B` union).
    Element(&'static str),
    /// Rows are themselves arrays of the inner element type.
    Nested(&'static ArrayType),
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(ty) => write!(f, "array<{ty}>"),
            Self::Nested(inner) => write!(f, "array<{inner}>"),
        }
    }
}

/// A declared value type, without a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueDef {
    /// Declared type string, e.g. `"int"`, `"?User"`, `"int|string"`,
    /// `"array"`. `None` for a fully dynamic value.
    pub ty: Option<&'static str>,
    /// Element type when `ty` is `array` / `?array`.
    pub array_type: Option<&'static ArrayType>,
}

impl ValueDef {
    /// `true` if the declared type admits `null`.
    pub fn is_nullable(&self) -> bool {
        self.ty.is_some_and(|t| {
            let t = t.trim();
            t.starts_with('?') || t.split('|').any(|c| c.trim() == "null")
        })
    }

    /// `true` for a declared type of literally `array` or `?array`.
    pub fn is_array(&self) -> bool {
        self.ty.is_some_and(|t| t.trim().trim_start_matches('?').trim() == "array")
    }

    /// `true` if a value of this type may be absent, given its `default`.
    pub fn is_optional(&self, default: Option<fn() -> Value>) -> bool {
        default.is_some() || self.is_nullable()
    }

    /// The value used when this value is absent: `default`, else `null`.
    pub fn fallback(default: Option<fn() -> Value>) -> Value {
        default.map_or(Value::Null, |d| d())
    }
}

/// One constructor parameter.
#[derive(Clone, Copy, Debug)]
pub struct ParamDef {
    /// Parameter (and raw map key) name.
    pub name: &'static str,
    /// Declared type.
    pub value: ValueDef,
    /// Produces the declared default value, if there is one.
    pub default: Option<fn() -> Value>,
}

impl ParamDef {
    /// `true` if the parameter may be left out of the raw map.
    pub fn is_optional(&self) -> bool {
        self.value.is_optional(self.default)
    }

    /// The value used when the parameter is absent: the declared default,
    /// else `null`.
    pub fn fallback(&self) -> Value {
        ValueDef::fallback(self.default)
    }
}

// ─── Entries ─────────────────────────────────────────────────────────────────

/// A concrete, constructible class.
#[derive(Clone, Copy)]
pub struct ClassDef {
    /// Registry name.
    pub name: &'static str,
    /// Constructor parameters, in declaration order.
    pub params: &'static [ParamDef],
    /// BuildIf predicate checked during union resolution.
    pub build_if: Option<&'static dyn Checker>,
    /// Builds the instance from bound arguments.
    pub construct: fn(&mut Args) -> Result<Object>,
}

/// An abstract class and the inheritors that may stand in for it.
#[derive(Clone, Copy, Debug)]
pub struct AbstractDef {
    /// Registry name.
    pub name: &'static str,
    /// Concrete (or further abstract) types to try, in order.
    pub inheritors: &'static [&'static str],
}

/// How an enum is matched against raw data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backing {
    /// No backing value: a raw string equal to the member name.
    Name,
    /// String-backed.
    String,
    /// Integer-backed.
    Int,
}

/// One member of an enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumMember {
    /// Member name.
    pub name: &'static str,
    /// Backing value (`Literal::Null` for [`Backing::Name`] enums).
    pub value: Literal,
}

/// A value enumeration.
#[derive(Clone, Copy, Debug)]
pub struct EnumDef {
    /// Registry name.
    pub name: &'static str,
    /// Matching rule.
    pub backing: Backing,
    /// Members, in declaration order.
    pub members: &'static [EnumMember],
    /// Builds the member at the given index.
    pub construct: fn(usize) -> Option<Object>,
}

/// A registry entry.
#[derive(Clone, Copy, Debug)]
pub enum TypeEntry {
    /// Concrete class.
    Class(ClassDef),
    /// Abstract class with available inheritors.
    Abstract(AbstractDef),
    /// Value enumeration.
    Enum(EnumDef),
}

impl TypeEntry {
    /// Registry name of the entry.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Class(c) => c.name,
            Self::Abstract(a) => a.name,
            Self::Enum(e) => e.name,
        }
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("build_if", &self.build_if.is_some())
            .finish_non_exhaustive()
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Resolves type names to their descriptors.
pub trait Registry {
    /// The entry registered under `name`.
    fn lookup(&self, name: &str) -> Option<&'static TypeEntry>;
}

impl<R: Registry + ?Sized> Registry for &R {
    fn lookup(&self, name: &str) -> Option<&'static TypeEntry> {
        (**self).lookup(name)
    }
}

/// A registry over a static slice of entries, searched linearly.
///
/// Suited to small hand-registered type sets; generated registries use a
/// `match` instead.
#[derive(Clone, Copy, Debug)]
pub struct StaticRegistry(pub &'static [&'static TypeEntry]);

impl Registry for StaticRegistry {
    fn lookup(&self, name: &str) -> Option<&'static TypeEntry> {
        self.0.iter().copied().find(|e| e.name() == name)
    }
}

/// Consults `first`, then `second`.
#[derive(Clone, Copy, Debug)]
pub struct Chain<A, B>(pub A, pub B);

impl<A: Registry, B: Registry> Registry for Chain<A, B> {
    fn lookup(&self, name: &str) -> Option<&'static TypeEntry> {
        self.0.lookup(name).or_else(|| self.1.lookup(name))
    }
}

// ─── Type-side traits ────────────────────────────────────────────────────────

/// A Rust type with a registry name.
pub trait Registered {
    /// The name the type is registered under.
    const TYPE_NAME: &'static str;
}

/// A class that can be constructed from bound arguments.
pub trait Construct: Registered + Instance + Sized {
    /// Take every parameter out of `args`.
    fn construct(args: &mut Args) -> Result<Self>;
}

/// A field-less enum with a fixed member list.
pub trait ValueEnum: Registered + Instance + Copy {
    /// Members, in the same order as the entry's [`EnumDef::members`].
    const VARIANTS: &'static [Self];
}

/// [`ClassDef::construct`] for a [`Construct`] type.
pub fn construct_with<T: Construct>(args: &mut Args) -> Result<Object> {
    T::construct(args).map(Object::new)
}

/// [`EnumDef::construct`] for a [`ValueEnum`] type.
pub fn nth_variant<T: ValueEnum>(index: usize) -> Option<Object> {
    T::VARIANTS.get(index).copied().map(Object::new)
}

// ─── Args ────────────────────────────────────────────────────────────────────

/// Constructor arguments, bound by name.
#[derive(Debug)]
pub struct Args {
    owner: String,
    values: Vec<(&'static str, Built)>,
}

impl Args {
    /// Arguments for the class labelled `owner` in diagnostics.
    pub fn new(owner: impl Into<String>) -> Self {
        Self { owner: owner.into(), values: Vec::new() }
    }

    /// Bind `name` to `value`.
    pub fn push(&mut self, name: &'static str, value: Built) {
        self.values.push((name, value));
    }

    /// Number of bound arguments not yet taken.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the argument bound to `name`, converted to `T`.
    pub fn take<T: FromBuilt>(&mut self, name: &str) -> Result<T> {
        let path = format!("{}::{name}", self.owner);
        let pos = self
            .values
            .iter()
            .position(|(n, _)| *n == name)
            .ok_or_else(|| BuildError::at(&path, "no value was bound"))?;
        let (_, value) = self.values.remove(pos);
        T::from_built(value).map_err(|v| {
            BuildError::at(&path, format_args!("a built {} does not fit the field type", v.kind()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_fall_back() {
        let int = ValueDef { ty: Some("int"), array_type: None };
        let maybe = ValueDef { ty: Some("?int"), array_type: None };
        let five: fn() -> Value = || Value::from(5);

        assert!(!int.is_optional(None));
        assert!(int.is_optional(Some(five)));
        assert!(maybe.is_optional(None));
        assert_eq!(ValueDef::fallback(None), Value::Null);
        assert_eq!(ValueDef::fallback(Some(five)), Value::from(5));

        let param = ParamDef { name: "n", value: int, default: Some(five) };
        assert!(param.is_optional());
        assert_eq!(param.fallback(), Value::from(5));
    }
}
