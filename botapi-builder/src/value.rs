//! Built values: [`Object`], [`Built`] and the row [`Key`] of typed arrays.

use std::any::Any;
use std::fmt;

use serde_json::Value;

use crate::descriptor::Registered;
use crate::raw::ToRaw;

// ─── Key ─────────────────────────────────────────────────────────────────────

/// The key of one row of a raw list or map.
///
/// JSON arrays yield [`Key::Index`] rows. Object keys that spell a canonical
/// non-negative integer (`"0"`, `"17"`, not `"007"`) are integer keys too, so
/// `{"0": …, "2": …}` keeps its sparse indices.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Positional or integer key.
    Index(u64),
    /// Any other map key.
    Name(String),
}

impl Key {
    /// Classify a JSON object key.
    pub fn from_map_key(key: &str) -> Self {
        match key.parse::<u64>() {
            Ok(n) if n.to_string() == key => Self::Index(n),
            _ => Self::Name(key.to_owned()),
        }
    }

    /// The key as it would appear in a JSON object.
    pub fn to_map_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n) => write!(f, "{n}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

/// Split a raw list or map into its rows, or `None` for any other value.
pub(crate) fn rows(raw: &Value) -> Option<Vec<(Key, &Value)>> {
    match raw {
        Value::Array(items) => Some(
            items.iter().enumerate().map(|(i, v)| (Key::Index(i as u64), v)).collect(),
        ),
        Value::Object(map) => Some(map.iter().map(|(k, v)| (Key::from_map_key(k), v)).collect()),
        _ => None,
    }
}

/// Short name of the runtime kind of a raw value, as used in diagnostics.
pub fn raw_kind(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "array",
    }
}

// ─── Instance / Object ───────────────────────────────────────────────────────

/// Anything the builder can hand out as an [`Object`].
pub trait Instance: Any + fmt::Debug + Send + Sync + ToRaw {
    /// Borrow as `Any` for type checks.
    fn as_any(&self) -> &dyn Any;
    /// Convert into `Box<dyn Any>` for downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + fmt::Debug + Send + Sync + ToRaw> Instance for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A constructed instance of a registered type.
pub struct Object {
    type_name: &'static str,
    value: Box<dyn Instance>,
}

impl Object {
    /// Wrap a registered value.
    pub fn new<T: Registered + Instance>(value: T) -> Self {
        Self { type_name: T::TYPE_NAME, value: Box::new(value) }
    }

    /// The registry name of the concrete type held.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn inner(&self) -> &dyn Instance {
        &*self.value
    }

    /// `true` if the held value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner().as_any().is::<T>()
    }

    /// Borrow the held value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner().as_any().downcast_ref::<T>()
    }

    /// Take the held value as a `T`, handing `self` back on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match <dyn Instance>::into_any(self.value).downcast::<T>() {
            Ok(v) => Ok(*v),
            // `is::<T>()` above makes this unreachable; keep the arm total.
            Err(_) => unreachable!("type check passed but downcast failed"),
        }
    }
}

impl ToRaw for Object {
    fn to_raw(&self) -> Value {
        self.inner().to_raw()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner(), f)
    }
}

// ─── Built ───────────────────────────────────────────────────────────────────

/// A value produced by the builder, before conversion into a Rust field type.
#[derive(Debug)]
pub enum Built {
    /// A raw value passed through unchanged (scalars, `null`, untyped arrays).
    Raw(Value),
    /// A constructed class or enum instance.
    Object(Object),
    /// A typed array, one built row per key, in input order.
    List(Vec<(Key, Built)>),
}

impl Built {
    /// Short description of the value's kind, for diagnostics.
    pub fn kind(&self) -> String {
        match self {
            Self::Raw(v) => raw_kind(v).to_owned(),
            Self::Object(o) => o.type_name().to_owned(),
            Self::List(_) => "list".to_owned(),
        }
    }

    /// `true` if this is an [`Object`] holding a `T`.
    pub fn is<T: Any>(&self) -> bool {
        matches!(self, Self::Object(o) if o.is::<T>())
    }

    /// Take the held object as a `T`, handing `self` back on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self {
            Self::Object(o) => o.downcast::<T>().map_err(Self::Object),
            other => Err(other),
        }
    }

    /// `true` for `Raw(null)`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Raw(Value::Null))
    }

    /// The rows of a typed array; raw JSON arrays and maps are split into
    /// raw rows so declared defaults such as `[]` convert like built lists.
    pub fn into_rows(self) -> Result<Vec<(Key, Built)>, Self> {
        match self {
            Self::List(rows) => Ok(rows),
            Self::Raw(Value::Array(items)) => Ok(items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::Index(i as u64), Self::Raw(v)))
                .collect()),
            Self::Raw(Value::Object(map)) => Ok(map
                .into_iter()
                .map(|(k, v)| (Key::from_map_key(&k), Self::Raw(v)))
                .collect()),
            other => Err(other),
        }
    }

    /// Borrowing view of the rows, see [`Built::into_rows`].
    pub(crate) fn visit_rows(&self, mut f: impl FnMut(&Built) -> bool) -> bool {
        match self {
            Self::List(rows) => rows.iter().all(|(_, b)| f(b)),
            Self::Raw(Value::Array(items)) => items.iter().all(|v| f(&Self::Raw(v.clone()))),
            Self::Raw(Value::Object(map)) => map.values().all(|v| f(&Self::Raw(v.clone()))),
            _ => false,
        }
    }
}

impl ToRaw for Built {
    fn to_raw(&self) -> Value {
        match self {
            Self::Raw(v) => v.clone(),
            Self::Object(o) => o.to_raw(),
            Self::List(rows) => {
                if rows.iter().enumerate().all(|(i, (k, _))| *k == Key::Index(i as u64)) {
                    Value::Array(rows.iter().map(|(_, b)| b.to_raw()).collect())
                } else {
                    Value::Object(rows.iter().map(|(k, b)| (k.to_map_key(), b.to_raw())).collect())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keys_classify() {
        assert_eq!(Key::from_map_key("0"), Key::Index(0));
        assert_eq!(Key::from_map_key("42"), Key::Index(42));
        assert_eq!(Key::from_map_key("007"), Key::Name("007".into()));
        assert_eq!(Key::from_map_key("-1"), Key::Name("-1".into()));
        assert_eq!(Key::from_map_key("id"), Key::Name("id".into()));
    }

    #[test]
    fn raw_kinds() {
        assert_eq!(raw_kind(&serde_json::json!(1)), "int");
        assert_eq!(raw_kind(&serde_json::json!(1.5)), "float");
        assert_eq!(raw_kind(&serde_json::json!({})), "array");
        assert_eq!(raw_kind(&serde_json::json!([])), "array");
        assert_eq!(raw_kind(&Value::Null), "null");
    }
}
