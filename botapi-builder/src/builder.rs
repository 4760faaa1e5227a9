//! The object builder: raw data in, typed objects out.
//!
//! Construction is driven entirely by [`TypeEntry`] descriptors. Type unions
//! (`A|B|C`, abstract inheritor lists) are resolved by trying each candidate
//! left to right and keeping the first success; a failed candidate is
//! recorded as a [`Reason`] and the search moves on. Only when every
//! candidate failed does the last reason become the terminal error.

use log::{debug, trace};
use serde_json::Value;

use crate::convert::FromBuilt;
use crate::descriptor::{
    AbstractDef, ArrayType, Args, Backing, ClassDef, EnumDef, ParamDef, Registered, Registry,
    TypeEntry, ValueDef,
};
use crate::error::{BuildError, Reason, Result};
use crate::value::{Built, Key, Object, raw_kind, rows};

// ─── Scalars ─────────────────────────────────────────────────────────────────

/// Built-in type names matched by runtime kind alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scalar {
    Int,
    Float,
    String,
    Bool,
    Null,
    Array,
}

impl Scalar {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "int" => Self::Int,
            "float" | "double" => Self::Float,
            "string" => Self::String,
            "bool" => Self::Bool,
            "null" => Self::Null,
            "array" => Self::Array,
            _ => return None,
        })
    }

    /// Exact kind match: `1` is never a `float`, `"1"` is never an `int`.
    /// An `int` must fit in `i64`.
    fn matches(self, raw: &Value) -> bool {
        match (self, raw) {
            (Self::Int, Value::Number(n)) => n.is_i64(),
            (Self::Float, Value::Number(n)) => n.is_f64(),
            (Self::String, Value::String(_)) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::Null, Value::Null) => true,
            (Self::Array, Value::Array(_) | Value::Object(_)) => true,
            _ => false,
        }
    }

    /// Why `raw` did not match.
    fn mismatch(self, name: &str, raw: &Value) -> String {
        match (self, raw) {
            (Self::Int, Value::Number(n)) if n.is_u64() => format!("{n} is out of range for int"),
            _ => format!("expected {name}, got {}", raw_kind(raw)),
        }
    }
}

/// Split a declared type string into its candidates.
///
/// `?T` is normalized to `T|null`. Candidate order is declaration order.
pub(crate) fn candidates(decl: &str) -> Vec<&str> {
    let decl = decl.trim();
    let (decl, nullable) = match decl.strip_prefix('?') {
        Some(rest) => (rest, true),
        None => (decl, false),
    };
    let mut out: Vec<&str> = decl.split('|').map(str::trim).filter(|c| !c.is_empty()).collect();
    if nullable && !out.contains(&"null") {
        out.push("null");
    }
    out
}

fn is_map(raw: &Value) -> bool {
    matches!(raw, Value::Array(_) | Value::Object(_))
}

/// `true` if `raw` is a map of exactly `{name: value}`.
fn is_wrapped(raw: &Value, name: &str) -> bool {
    match raw {
        Value::Object(map) => map.len() == 1 && map.contains_key(name),
        _ => false,
    }
}

/// The value at `name` in a raw map (JSON arrays have no named keys).
fn field<'v>(raw: &'v Value, name: &str) -> Option<&'v Value> {
    match raw {
        Value::Object(map) => map.get(name),
        _ => None,
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Builds typed values from raw data using the descriptors in a [`Registry`].
///
/// The builder keeps no state between calls; it only reads the registry.
#[derive(Clone, Copy, Debug)]
pub struct Builder<R> {
    registry: R,
}

impl<R: Registry> Builder<R> {
    /// A builder over `registry`.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// The registry this builder reads.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    fn entry(&self, type_name: &str) -> Result<&'static TypeEntry> {
        self.registry
            .lookup(type_name)
            .ok_or_else(|| BuildError::UnknownClass { name: type_name.to_owned() })
    }

    /// Build an instance of `type_name` from `raw`.
    ///
    /// `label` names the value in diagnostics and defaults to the type name.
    /// Abstract types yield an instance of the first inheritor that builds.
    pub fn build(&self, type_name: &str, raw: &Value, label: Option<&str>) -> Result<Object> {
        let entry = self.entry(type_name)?;
        self.build_entry(entry, raw, label.unwrap_or(type_name))
    }

    /// Typed form of [`Builder::build`].
    pub fn build_as<T: Registered + FromBuilt>(&self, raw: &Value) -> Result<T> {
        let object = self.build(T::TYPE_NAME, raw, None)?;
        let found = object.type_name();
        T::from_built(Built::Object(object)).map_err(|_| {
            BuildError::at(T::TYPE_NAME, format_args!("built a '{found}', which is not a {}", T::TYPE_NAME))
        })
    }

    /// Build every row of the list or map `raw` as a `type_name`.
    ///
    /// Keys are preserved. Each row is labelled `[key]`; the first failing
    /// row fails the whole call.
    pub fn build_many(&self, type_name: &str, raw: &Value) -> Result<Vec<(Key, Object)>> {
        let entry = self.entry(type_name)?;
        let rows = rows(raw).ok_or_else(|| {
            BuildError::at(type_name, format_args!("expected an array, got {}", raw_kind(raw)))
        })?;
        debug!("building {} rows of {type_name}", rows.len());
        rows.into_iter()
            .map(|(key, row)| {
                let label = format!("[{key}]");
                self.build_entry(entry, row, &label).map(|obj| (key, obj))
            })
            .collect()
    }

    /// Typed form of [`Builder::build_many`].
    pub fn build_many_as<T: Registered + FromBuilt>(&self, raw: &Value) -> Result<Vec<(Key, T)>> {
        self.build_many(T::TYPE_NAME, raw)?
            .into_iter()
            .map(|(key, obj)| {
                let found = obj.type_name();
                T::from_built(Built::Object(obj))
                    .map(|v| (key.clone(), v))
                    .map_err(|_| {
                        BuildError::at(
                            &format!("[{key}]"),
                            format_args!("built a '{found}', which is not a {}", T::TYPE_NAME),
                        )
                    })
            })
            .collect()
    }

    /// Resolve a free-standing declaration such as a method's result type.
    pub fn build_value(&self, def: &ValueDef, raw: &Value, label: &str) -> Result<Built> {
        self.bind(def, None, Some(raw), label)
    }

    // ── Classes ──────────────────────────────────────────────────────────────

    fn build_entry(&self, entry: &'static TypeEntry, raw: &Value, label: &str) -> Result<Object> {
        match entry {
            TypeEntry::Class(class) => self.build_class(class, raw, label),
            TypeEntry::Abstract(abs) => self.build_abstract(abs, raw, label),
            TypeEntry::Enum(def) => build_enum(def, raw).map_err(|m| BuildError::at(label, m)),
        }
    }

    fn build_abstract(&self, abs: &AbstractDef, raw: &Value, label: &str) -> Result<Object> {
        if abs.inheritors.is_empty() {
            return Err(BuildError::at(
                label,
                format_args!("cannot build abstract class '{}' without inheritors", abs.name),
            ));
        }
        match self.first_match(abs.inheritors.iter().copied(), raw, label) {
            Ok(Built::Object(obj)) => Ok(obj),
            Ok(other) => Err(BuildError::at(
                label,
                format_args!("inheritor of '{}' built a {}, not an object", abs.name, other.kind()),
            )),
            Err(reason) => Err(reason.into_error(label)),
        }
    }

    fn build_class(&self, class: &ClassDef, raw: &Value, label: &str) -> Result<Object> {
        let mut args = Args::new(label);
        match class.params {
            [] => {
                if !is_map(raw) {
                    return Err(BuildError::at(
                        label,
                        format_args!("expected an array, got {}", raw_kind(raw)),
                    ));
                }
            }
            [only] if !is_wrapped(raw, only.name) => {
                let path = format!("{label}::{}", only.name);
                args.push(only.name, self.bind(&only.value, only.default, Some(raw), &path)?);
            }
            params => {
                if !is_map(raw) {
                    return Err(BuildError::at(
                        label,
                        format_args!("expected an array, got {}", raw_kind(raw)),
                    ));
                }
                for param in params {
                    args.push(param.name, self.bind_param(param, raw, label)?);
                }
            }
        }
        (class.construct)(&mut args)
    }

    fn bind_param(&self, param: &ParamDef, raw: &Value, label: &str) -> Result<Built> {
        let path = format!("{label}::{}", param.name);
        self.bind(&param.value, param.default, field(raw, param.name), &path)
    }

    /// Bind one declared value. `value` is `None` when the key is absent.
    fn bind(
        &self,
        def: &ValueDef,
        default: Option<fn() -> Value>,
        value: Option<&Value>,
        path: &str,
    ) -> Result<Built> {
        let optional = def.is_optional(default);
        let fallback = if optional { ValueDef::fallback(default) } else { Value::Null };

        let Some(ty) = def.ty else {
            return Ok(Built::Raw(value.cloned().unwrap_or(fallback)));
        };

        match def.array_type {
            Some(array_type) if def.is_array() => {
                let value = value.unwrap_or(&fallback);
                if optional && *value == fallback {
                    return Ok(Built::Raw(fallback));
                }
                if !is_map(value) {
                    return Err(BuildError::at(
                        path,
                        format_args!("expected {array_type}, got {}", raw_kind(value)),
                    ));
                }
                self.build_rows(array_type, value, path)
            }
            _ => self.resolve(ty, value.unwrap_or(&fallback), path),
        }
    }

    // ── Arrays ───────────────────────────────────────────────────────────────

    fn build_rows(&self, array_type: &ArrayType, raw: &Value, path: &str) -> Result<Built> {
        let Some(rows) = rows(raw) else {
            return Err(BuildError::at(
                path,
                format_args!("expected {array_type}, got {}", raw_kind(raw)),
            ));
        };
        let mut out = Vec::with_capacity(rows.len());
        for (key, row) in rows {
            let label = format!("{path}[{key}]");
            let built = match array_type {
                ArrayType::Nested(inner) => self.build_rows(inner, row, &label)?,
                ArrayType::Element(decl) => self.resolve(decl, row, &label)?,
            };
            out.push((key, built));
        }
        Ok(Built::List(out))
    }

    // ── Unions ───────────────────────────────────────────────────────────────

    /// Resolve the declared union `decl` against `raw`.
    fn resolve(&self, decl: &str, raw: &Value, path: &str) -> Result<Built> {
        self.first_match(candidates(decl).into_iter(), raw, path)
            .map_err(|reason| reason.into_error(path))
    }

    /// Try `names` in order, returning the first success or the last reason.
    fn first_match<'a>(
        &self,
        names: impl Iterator<Item = &'a str>,
        raw: &Value,
        path: &str,
    ) -> std::result::Result<Built, Reason> {
        let mut reason = Reason::Message("no candidate type is declared".to_owned());
        for name in names {
            match self.try_candidate(name, raw, path) {
                Ok(built) => return Ok(built),
                Err(r) => {
                    trace!("{path}: candidate '{name}' rejected: {r}");
                    reason = r;
                }
            }
        }
        Err(reason)
    }

    fn try_candidate(&self, name: &str, raw: &Value, path: &str) -> std::result::Result<Built, Reason> {
        if let Some(entry) = self.registry.lookup(name) {
            return match entry {
                TypeEntry::Enum(def) => build_enum(def, raw).map(Built::Object).map_err(Reason::Message),
                TypeEntry::Abstract(abs) if !abs.inheritors.is_empty() => {
                    self.first_match(abs.inheritors.iter().copied(), raw, path)
                }
                TypeEntry::Abstract(abs) => {
                    self.build_abstract(abs, raw, path).map(Built::Object).map_err(Reason::Nested)
                }
                TypeEntry::Class(class) => {
                    if let Some(check) = class.build_if {
                        if !check.check(raw) {
                            return Err(Reason::Message(format!(
                                "build condition of '{}' rejected the value",
                                class.name
                            )));
                        }
                    }
                    self.build_class(class, raw, path).map(Built::Object).map_err(Reason::Nested)
                }
            };
        }
        match Scalar::from_name(name) {
            Some(scalar) if scalar.matches(raw) => Ok(Built::Raw(raw.clone())),
            Some(scalar) => Err(Reason::Message(scalar.mismatch(name, raw))),
            None => Err(Reason::Message(format!("cannot build unknown type '{name}'"))),
        }
    }
}

// ─── Enums ───────────────────────────────────────────────────────────────────

fn build_enum(def: &EnumDef, raw: &Value) -> std::result::Result<Object, String> {
    let index = match (def.backing, raw) {
        (Backing::Name, Value::String(s)) => def.members.iter().position(|m| m.name == s),
        (Backing::String, Value::String(_)) | (Backing::Int, Value::Number(_)) => {
            def.members.iter().position(|m| m.value.matches(raw))
        }
        _ => {
            return Err(format!(
                "cannot build enum '{}' from a value of type {}",
                def.name,
                raw_kind(raw)
            ));
        }
    };
    index
        .and_then(|i| (def.construct)(i))
        .ok_or_else(|| format!("{raw} is not a valid '{}' value", def.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_normalizes_to_trailing_null() {
        assert_eq!(candidates("?int|string"), vec!["int", "string", "null"]);
        assert_eq!(candidates("?int|null"), vec!["int", "null"]);
        assert_eq!(candidates(" A | B "), vec!["A", "B"]);
    }

    #[test]
    fn scalar_kinds_are_exact() {
        assert!(Scalar::Int.matches(&serde_json::json!(1)));
        assert!(!Scalar::Float.matches(&serde_json::json!(1)));
        assert!(Scalar::Float.matches(&serde_json::json!(1.0)));
        assert!(!Scalar::Int.matches(&serde_json::json!("1")));
        assert!(Scalar::Array.matches(&serde_json::json!({"a": 1})));
    }

    #[test]
    fn ints_must_fit_i64() {
        let big = serde_json::json!(u64::MAX);
        assert!(!Scalar::Int.matches(&big));
        assert!(Scalar::Int.matches(&serde_json::json!(i64::MAX)));
        assert_eq!(Scalar::Int.mismatch("int", &big), "18446744073709551615 is out of range for int");
        assert_eq!(Scalar::Int.mismatch("int", &serde_json::json!("1")), "expected int, got string");
    }
}
