use std::fmt;
use std::str::FromStr;

use crate::ast::ty::is_identifier;
use crate::ast::{Category, Check, Parameter, TypeExpr};
use crate::errors::ParseError;
use crate::utils::tokens;

/// A single type or method definition.
///
/// For example:
/// ```text
/// chatMemberOwner {status="creator"} status:string user:User = ChatMember;
/// ```
/// becomes a `Definition` with `name = "chatMemberOwner"`, one check,
/// `params = [status:string, user:User]` and `ty = ChatMember`.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    /// The definition name (e.g. `"user"`, `"sendMessage"`).
    pub name: String,

    /// Build checks, in declaration order.
    pub checks: Vec<Check>,

    /// Ordered list of parameters.
    pub params: Vec<Parameter>,

    /// For types, the type this definition belongs to (e.g. `User`, or the
    /// abstract `ChatMember`). For methods, the result type expression.
    pub ty: TypeExpr,

    /// Whether this is an entity or a method.
    pub category: Category,
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for c in &self.checks {
            write!(f, " {c}")?;
        }
        for p in &self.params {
            write!(f, " {p}")?;
        }
        write!(f, " = {}", self.ty)
    }
}

impl FromStr for Definition {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        // The last `=` introduces the type; earlier ones belong to defaults.
        let (lhs, ty_str) = raw.rsplit_once('=').ok_or(ParseError::MissingType)?;
        let ty_str = ty_str.trim().trim_end_matches(';').trim();

        if ty_str.is_empty() {
            return Err(ParseError::MissingType);
        }

        let ty = TypeExpr::from_str(ty_str).map_err(|_| ParseError::MissingType)?;

        let mut parts = tokens(lhs).into_iter();
        let name = parts.next().ok_or(ParseError::MissingName)?;
        if !is_identifier(name) {
            return Err(ParseError::MissingName);
        }

        let mut checks = Vec::new();
        let mut params = Vec::new();
        for token in parts {
            if token.starts_with('{') {
                checks.push(Check::from_str(token)?);
            } else {
                params.push(Parameter::from_str(token)?);
            }
        }

        Ok(Definition {
            name: name.to_owned(),
            checks,
            params,
            ty,
            category: Category::Types, // caller sets the real category
        })
    }
}
