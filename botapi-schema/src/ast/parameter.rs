use std::fmt;
use std::str::FromStr;

use crate::ast::ParameterType;
use crate::errors::ParamParseError;
use crate::utils::find_top_level;

/// A single `name:Type` parameter inside a type or method definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// The parameter name, which is also its key in the raw JSON map.
    pub name: String,
    /// The declared type of this parameter.
    pub ty: ParameterType,
    /// The default value as JSON literal text (`100`, `"HTML"`, `[]`).
    pub default: Option<String>,
}

impl Parameter {
    /// `true` if the parameter may be omitted from the raw map.
    pub fn is_optional(&self) -> bool {
        self.default.is_some() || matches!(self.ty, ParameterType::Normal { nullable: true, .. })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.ty)?;
        if let Some(default) = &self.default {
            write!(f, "={default}")?;
        }
        Ok(())
    }
}

impl FromStr for Parameter {
    type Err = ParamParseError;

    /// Parses a single parameter token such as `chat_id:ChatId`,
    /// `text:?string` or `limit:int=100`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (name, rest) = token.split_once(':').ok_or(ParamParseError::NotImplemented)?;

        if name.is_empty() || rest.is_empty() {
            return Err(ParamParseError::Empty);
        }

        let (ty_str, default) = match find_top_level(rest, '=') {
            Some(at) => {
                let literal = rest[at + 1..].trim();
                if literal.is_empty() {
                    return Err(ParamParseError::MissingDefault);
                }
                (&rest[..at], Some(literal.to_owned()))
            }
            None => (rest, None),
        };

        Ok(Self { name: name.to_owned(), ty: ty_str.parse()?, default })
    }
}
