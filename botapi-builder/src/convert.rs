//! The [`FromBuilt`] trait and its implementations for field types.
//!
//! Conversions are as strict as the builder's own kind matching: an integer
//! never becomes an `f64`, and an [`crate::Object`] only becomes its own type.

use serde_json::Value;

use crate::raw::ToRaw;
use crate::value::Built;

/// Convert a [`Built`] value into a concrete field type.
pub trait FromBuilt: Sized {
    /// `true` if `value` has the shape this type converts from.
    fn accepts(value: &Built) -> bool;

    /// Convert `value`, handing it back unchanged when it does not fit.
    fn from_built(value: Built) -> Result<Self, Built>;
}

// ─── Scalars ─────────────────────────────────────────────────────────────────

impl FromBuilt for i64 {
    fn accepts(value: &Built) -> bool {
        matches!(value, Built::Raw(Value::Number(n)) if n.is_i64())
    }

    fn from_built(value: Built) -> Result<Self, Built> {
        let n = match &value {
            Built::Raw(Value::Number(n)) => n.as_i64(),
            _ => None,
        };
        n.ok_or(value)
    }
}

impl FromBuilt for f64 {
    fn accepts(value: &Built) -> bool {
        matches!(value, Built::Raw(Value::Number(n)) if n.is_f64())
    }

    fn from_built(value: Built) -> Result<Self, Built> {
        let n = match &value {
            Built::Raw(Value::Number(n)) if n.is_f64() => n.as_f64(),
            _ => None,
        };
        n.ok_or(value)
    }
}

impl FromBuilt for bool {
    fn accepts(value: &Built) -> bool {
        matches!(value, Built::Raw(Value::Bool(_)))
    }

    fn from_built(value: Built) -> Result<Self, Built> {
        match value {
            Built::Raw(Value::Bool(b)) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromBuilt for String {
    fn accepts(value: &Built) -> bool {
        matches!(value, Built::Raw(Value::String(_)))
    }

    fn from_built(value: Built) -> Result<Self, Built> {
        match value {
            Built::Raw(Value::String(s)) => Ok(s),
            other => Err(other),
        }
    }
}

/// Fully dynamic and untyped-array fields keep whatever was built, as JSON.
impl FromBuilt for Value {
    fn accepts(_: &Built) -> bool {
        true
    }

    fn from_built(value: Built) -> Result<Self, Built> {
        Ok(match value {
            Built::Raw(v) => v,
            other => other.to_raw(),
        })
    }
}

// ─── Containers ──────────────────────────────────────────────────────────────

impl<T: FromBuilt> FromBuilt for Option<T> {
    fn accepts(value: &Built) -> bool {
        value.is_null() || T::accepts(value)
    }

    fn from_built(value: Built) -> Result<Self, Built> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_built(value).map(Some)
    }
}

impl<T: FromBuilt> FromBuilt for Box<T> {
    fn accepts(value: &Built) -> bool {
        T::accepts(value)
    }

    fn from_built(value: Built) -> Result<Self, Built> {
        T::from_built(value).map(Box::new)
    }
}

/// Rows are converted in key order; the keys themselves are dropped.
impl<T: FromBuilt> FromBuilt for Vec<T> {
    fn accepts(value: &Built) -> bool {
        value.visit_rows(T::accepts)
    }

    fn from_built(value: Built) -> Result<Self, Built> {
        if !Self::accepts(&value) {
            return Err(value);
        }
        value.into_rows()?.into_iter().map(|(_, row)| T::from_built(row)).collect()
    }
}
