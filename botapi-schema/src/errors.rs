use std::fmt;

/// Errors produced while parsing a single parameter token.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamParseError {
    /// An empty string was encountered where a name/type was expected.
    Empty,
    /// A generic `<…>` argument was malformed (missing closing `>`).
    InvalidGeneric,
    /// A type name contained characters other than `[A-Za-z0-9_]`.
    InvalidName,
    /// A `A|B` union had an empty alternative.
    InvalidUnion,
    /// A `name=literal` default with nothing after the `=`.
    MissingDefault,
    /// A bare `name` with no `:type`.
    NotImplemented,
}

impl fmt::Display for ParamParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty token"),
            Self::InvalidGeneric => write!(f, "invalid generic argument (unclosed `<`)"),
            Self::InvalidName => write!(f, "invalid type name"),
            Self::InvalidUnion => write!(f, "empty alternative in type union"),
            Self::MissingDefault => write!(f, "missing default value after `=`"),
            Self::NotImplemented => write!(f, "parameter without `:type` is not supported"),
        }
    }
}

impl std::error::Error for ParamParseError {}

/// Errors produced while parsing a complete schema declaration.
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The input was blank.
    Empty,
    /// No `= Type` was found.
    MissingType,
    /// The name (before `=`) was missing or malformed.
    MissingName,
    /// A parameter was invalid.
    InvalidParam(ParamParseError),
    /// An enum declaration had a bad backing type or member list.
    InvalidEnum,
    /// A `{field}` / `{field=literal}` check was malformed.
    InvalidCheck,
    /// The declaration uses a syntax (or section) we don't support.
    NotImplemented,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty declaration"),
            Self::MissingType => write!(f, "missing `= Type`"),
            Self::MissingName => write!(f, "missing or malformed name"),
            Self::InvalidParam(e) => write!(f, "invalid parameter: {e}"),
            Self::InvalidEnum => write!(f, "invalid enum declaration"),
            Self::InvalidCheck => write!(f, "invalid build check"),
            Self::NotImplemented => write!(f, "unsupported schema syntax"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParam(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamParseError> for ParseError {
    fn from(e: ParamParseError) -> Self {
        Self::InvalidParam(e)
    }
}
