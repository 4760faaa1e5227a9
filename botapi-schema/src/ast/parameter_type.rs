use std::fmt;
use std::str::FromStr;

use crate::errors::ParamParseError;
use crate::ast::TypeExpr;

/// The declared type of a single parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// `any`: the raw value is kept as-is, whatever its shape.
    Any,

    /// A regular typed parameter.
    Normal {
        /// The declared type expression.
        ty: TypeExpr,
        /// `true` for `?Type`: the value may be `null` or absent.
        nullable: bool,
    },
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Normal { ty, nullable } => {
                if *nullable {
                    write!(f, "?")?;
                }
                write!(f, "{ty}")
            }
        }
    }
}

impl FromStr for ParameterType {
    type Err = ParamParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "any" {
            return Ok(Self::Any);
        }

        let (s, nullable) = match s.strip_prefix('?') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        Ok(Self::Normal { ty: TypeExpr::from_str(s)?, nullable })
    }
}
