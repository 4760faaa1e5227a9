//! Parser for Bot API schema files.
//!
//! This crate converts raw `.schema` text into a structured [`Declaration`]
//! AST which can then be used by code-generators (see `botapi-gen`).
//!
//! # Quick start
//!
//! ```rust
//! use botapi_schema::{ast::Declaration, parse_schema_file};
//!
//! let src = "user id:int first_name:string last_name:?string = User;";
//! for decl in parse_schema_file(src) {
//!     if let Declaration::Definition(def) = decl.unwrap() {
//!         assert_eq!(def.params.len(), 3);
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
/// Parse error types for schema parsing.
pub mod errors;
mod iterator;
mod utils;

use ast::Declaration;
use errors::ParseError;

/// Parses a complete schema file, yielding [`Declaration`]s one by one.
///
/// Lines starting with `//` are treated as comments and skipped.
/// The `---enums---`, `---unions---`, `---types---` and `---methods---`
/// section markers switch how the following declarations are read; the
/// file starts in the types section.
///
/// Returns an iterator of `Result<Declaration, ParseError>` so callers can
/// decide whether to skip or hard-fail on bad lines.
pub fn parse_schema_file(contents: &str) -> impl Iterator<Item = Result<Declaration, ParseError>> + '_ {
    iterator::SchemaIterator::new(contents)
}

/// Reads the `// BOT API x.y` header from the first line of a schema file.
///
/// ```rust
/// assert_eq!(botapi_schema::api_version("// BOT API 7.0\n"), Some("7.0"));
/// assert_eq!(botapi_schema::api_version("user = User;"), None);
/// ```
pub fn api_version(contents: &str) -> Option<&str> {
    let line = contents.lines().next()?;
    let version = line.trim().strip_prefix("// BOT API ")?.trim();
    if version.is_empty() { None } else { Some(version) }
}
