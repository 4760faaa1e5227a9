use std::fmt;
use std::str::FromStr;

use crate::ast::TypeExpr;
use crate::ast::ty::is_identifier;
use crate::errors::ParseError;

/// A named type union, e.g. `ChatId = int | string;`.
///
/// Aliases are expanded wherever the name is used as a parameter type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alias {
    /// The alias name.
    pub name: String,
    /// The aliased type expression.
    pub ty: TypeExpr,
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.ty)
    }
}

impl FromStr for Alias {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        let (name, ty) = raw.split_once('=').ok_or(ParseError::MissingType)?;
        let name = name.trim();
        if !is_identifier(name) {
            return Err(ParseError::MissingName);
        }

        Ok(Self { name: name.to_owned(), ty: ty.parse()? })
    }
}
