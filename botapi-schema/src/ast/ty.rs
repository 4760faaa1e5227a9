use std::fmt;
use std::str::FromStr;

use crate::errors::ParamParseError;
use crate::utils::split_top_level;

/// Built-in scalar type names.
pub const SCALARS: &[&str] = &["int", "float", "double", "string", "bool", "array", "null"];

/// `true` for `[A-Za-z][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A single type reference, e.g. `User` or `Vector<PhotoSize>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    /// The type name, e.g. `"Vector"`, `"int"` or `"Message"`.
    pub name: String,

    /// `true` when the name is one of the built-in [`SCALARS`].
    pub scalar: bool,

    /// The generic argument, e.g. `PhotoSize` in `Vector<PhotoSize>`.
    pub generic_arg: Option<Box<TypeExpr>>,
}

impl Type {
    /// `true` for `Vector<…>`.
    pub fn is_vector(&self) -> bool {
        self.name == "Vector" && self.generic_arg.is_some()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(arg) = &self.generic_arg {
            write!(f, "<{arg}>")?;
        }
        Ok(())
    }
}

impl FromStr for Type {
    type Err = ParamParseError;

    /// Parses a single type such as `Vector<Vector<PhotoSize>>`.
    ///
    /// # Examples
    /// ```
    /// use botapi_schema::ast::Type;
    /// assert!("Vector<int>".parse::<Type>().is_ok());
    /// assert!("Vector<int".parse::<Type>().is_err());
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();

        let (name, generic_arg) = match raw.split_once('<') {
            Some((name, rest)) => match rest.strip_suffix('>') {
                Some(arg) => (name.trim(), Some(Box::new(TypeExpr::from_str(arg)?))),
                None => return Err(ParamParseError::InvalidGeneric),
            },
            None => (raw, None),
        };

        if name.is_empty() {
            return Err(ParamParseError::Empty);
        }
        if !is_identifier(name) {
            return Err(ParamParseError::InvalidName);
        }

        Ok(Self { name: name.to_owned(), scalar: SCALARS.contains(&name), generic_arg })
    }
}

/// A type expression: one or more `|`-separated alternatives.
///
/// `Message|bool` has two alternatives; `User` has one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeExpr {
    /// The alternatives, in declaration order.
    pub alternatives: Vec<Type>,
}

impl TypeExpr {
    /// The only alternative, if there is exactly one.
    pub fn single(&self) -> Option<&Type> {
        match self.alternatives.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alt) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{alt}")?;
        }
        Ok(())
    }
}

impl FromStr for TypeExpr {
    type Err = ParamParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().is_empty() {
            return Err(ParamParseError::Empty);
        }
        let alternatives = split_top_level(raw, '|')
            .into_iter()
            .map(|alt| {
                if alt.is_empty() {
                    Err(ParamParseError::InvalidUnion)
                } else {
                    Type::from_str(alt)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { alternatives })
    }
}
