use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

/// A build check, e.g. `{inline_keyboard}` or `{status="creator"}`.
///
/// Checks are attached to a concrete type and decide whether it may be
/// built from a raw value during union resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Check {
    /// The raw map key that is inspected.
    pub field: String,
    /// JSON literal text the field must equal; `None` only requires presence.
    pub value: Option<String>,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{{{}={v}}}", self.field),
            None => write!(f, "{{{}}}", self.field),
        }
    }
}

impl FromStr for Check {
    type Err = ParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let inner = token
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .ok_or(ParseError::InvalidCheck)?;

        let (field, value) = match inner.split_once('=') {
            Some((field, value)) => (field.trim(), Some(value.trim())),
            None => (inner.trim(), None),
        };

        if field.is_empty() || value.is_some_and(str::is_empty) {
            return Err(ParseError::InvalidCheck);
        }

        Ok(Self { field: field.to_owned(), value: value.map(str::to_owned) })
    }
}
