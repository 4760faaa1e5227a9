//! The [`BuildError`] type returned by every builder entry point.

use std::fmt;

// ─── BuildError ──────────────────────────────────────────────────────────────

/// Errors that can occur while building a typed value from raw data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// The requested target type is not known to the registry.
    UnknownClass {
        /// The type name that failed to resolve.
        name: String,
    },
    /// The raw value could not be turned into an instance of the target type.
    InvalidData {
        /// Human-readable diagnostic, naming the failing parameter path.
        message: String,
    },
}

impl BuildError {
    /// Shorthand for an [`BuildError::InvalidData`] with the given message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// An [`BuildError::InvalidData`] scoped to the parameter `path`.
    pub fn at(path: &str, reason: impl fmt::Display) -> Self {
        Self::invalid(format!("cannot build parameter '{path}' because of reason: {reason}"))
    }

    /// The type name that was not found, for [`BuildError::UnknownClass`].
    pub fn unknown_name(&self) -> Option<&str> {
        match self {
            Self::UnknownClass { name } => Some(name),
            Self::InvalidData { .. } => None,
        }
    }

    /// `true` for [`BuildError::InvalidData`].
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Self::InvalidData { .. })
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClass { name } => write!(f, "unknown class '{name}'"),
            Self::InvalidData { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for BuildError {}

/// Specialized `Result` for building.
pub type Result<T> = std::result::Result<T, BuildError>;

// ─── Reason ──────────────────────────────────────────────────────────────────

/// Why a single union candidate did not match.
///
/// Candidate failures are ordinary control flow; only the reason recorded for
/// the last candidate survives, and only when every candidate failed.
#[derive(Debug)]
pub(crate) enum Reason {
    /// A plain diagnostic, wrapped with the parameter path when surfaced.
    Message(String),
    /// A structured failure from a nested build, surfaced unchanged.
    Nested(BuildError),
}

impl Reason {
    pub(crate) fn into_error(self, path: &str) -> BuildError {
        match self {
            Self::Message(m) => BuildError::at(path, m),
            Self::Nested(e) => e,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(m) => f.write_str(m),
            Self::Nested(e) => write!(f, "{e}"),
        }
    }
}
