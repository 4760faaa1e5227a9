//! The [`ToRaw`] trait: typed values back to raw JSON.
//!
//! This is the inverse of building: `build(T, x.to_raw())` reconstructs `x`
//! for every field the serializer writes. Absent optional fields are left out
//! of the map rather than written as `null`.

use serde_json::{Map, Value};

/// Serialize `self` into an untyped [`Value`].
pub trait ToRaw {
    /// The raw form of `self`.
    fn to_raw(&self) -> Value;
}

// ─── scalars ─────────────────────────────────────────────────────────────────

impl ToRaw for i64 {
    fn to_raw(&self) -> Value {
        Value::from(*self)
    }
}

impl ToRaw for f64 {
    fn to_raw(&self) -> Value {
        Value::from(*self)
    }
}

impl ToRaw for bool {
    fn to_raw(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToRaw for String {
    fn to_raw(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToRaw for Value {
    fn to_raw(&self) -> Value {
        self.clone()
    }
}

// ─── containers ──────────────────────────────────────────────────────────────

impl<T: ToRaw> ToRaw for Option<T> {
    fn to_raw(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToRaw::to_raw)
    }
}

impl<T: ToRaw> ToRaw for Box<T> {
    fn to_raw(&self) -> Value {
        (**self).to_raw()
    }
}

impl<T: ToRaw> ToRaw for Vec<T> {
    fn to_raw(&self) -> Value {
        Value::Array(self.iter().map(ToRaw::to_raw).collect())
    }
}

// ─── maps ────────────────────────────────────────────────────────────────────

/// Incremental writer for the raw map of a struct.
///
/// Generated `ToRaw` impls push every field through [`RawMap::field`] or
/// [`RawMap::optional`], then call [`RawMap::finish`].
#[derive(Debug, Default)]
pub struct RawMap(Map<String, Value>);

impl RawMap {
    /// Start an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a required field.
    pub fn field(mut self, name: &str, value: &impl ToRaw) -> Self {
        self.0.insert(name.to_owned(), value.to_raw());
        self
    }

    /// Write an optional field, skipping it when `None`.
    pub fn optional<T: ToRaw>(mut self, name: &str, value: &Option<T>) -> Self {
        if let Some(v) = value {
            self.0.insert(name.to_owned(), v.to_raw());
        }
        self
    }

    /// The finished JSON object.
    pub fn finish(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_none_is_skipped() {
        let raw = RawMap::new()
            .field("id", &5i64)
            .optional::<String>("name", &None)
            .optional("title", &Some("x".to_owned()))
            .finish();
        assert_eq!(raw, serde_json::json!({"id": 5, "title": "x"}));
    }

    #[test]
    fn nested_vectors() {
        let v = vec![vec![1i64, 2], vec![3]];
        assert_eq!(v.to_raw(), serde_json::json!([[1, 2], [3]]));
    }
}
