use std::fmt;
use std::str::FromStr;

use crate::ast::ty::is_identifier;
use crate::errors::ParseError;
use crate::utils::{find_top_level, split_top_level};

/// How enum members are matched against raw values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backing {
    /// No backing type: members match their own name.
    Name,
    /// `:string`, members match a string value.
    String,
    /// `:int`, members match an integer value.
    Int,
}

/// One member of an [`Enumeration`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    /// The member name as written.
    pub name: String,
    /// Explicit backing value text (`1`, `"creator"`), if any.
    pub value: Option<String>,
}

impl Member {
    /// The string this member matches for a [`Backing::String`] enum:
    /// the explicit value (quotes removed) or else the member name.
    pub fn string_value(&self) -> &str {
        match &self.value {
            Some(v) => v.strip_prefix('"').and_then(|v| v.strip_suffix('"')).unwrap_or(v),
            None => &self.name,
        }
    }

    /// The integer this member matches for a [`Backing::Int`] enum.
    pub fn int_value(&self) -> Option<i64> {
        self.value.as_deref()?.parse().ok()
    }
}

/// A value enumeration, e.g. `ChatType:string = private | group;`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Enumeration {
    /// The enum name.
    pub name: String,
    /// Matching rule for the members.
    pub backing: Backing,
    /// Members, in declaration order.
    pub members: Vec<Member>,
}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match self.backing {
            Backing::Name => {}
            Backing::String => write!(f, ":string")?,
            Backing::Int => write!(f, ":int")?,
        }
        write!(f, " =")?;
        for (i, m) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, " |")?;
            }
            write!(f, " {}", m.name)?;
            if let Some(v) = &m.value {
                write!(f, "={v}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Enumeration {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        let (lhs, rhs) = raw.split_once('=').ok_or(ParseError::MissingType)?;

        let (name, backing) = match lhs.split_once(':') {
            Some((name, b)) => match b.trim() {
                "string" => (name, Backing::String),
                "int" => (name, Backing::Int),
                _ => return Err(ParseError::InvalidEnum),
            },
            None => (lhs, Backing::Name),
        };
        let name = name.trim();
        if !is_identifier(name) {
            return Err(ParseError::MissingName);
        }

        let members = split_top_level(rhs, '|')
            .into_iter()
            .map(|m| parse_member(m, backing))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name: name.to_owned(), backing, members })
    }
}

fn parse_member(raw: &str, backing: Backing) -> Result<Member, ParseError> {
    let (name, value) = match find_top_level(raw, '=') {
        Some(at) => (raw[..at].trim(), Some(raw[at + 1..].trim())),
        None => (raw, None),
    };

    if !is_identifier(name) {
        return Err(ParseError::InvalidEnum);
    }

    let valid = match (backing, value) {
        (_, Some("")) => false,
        (Backing::Name, Some(_)) => false,
        (Backing::Int, v) => v.is_some_and(|v| v.parse::<i64>().is_ok()),
        _ => true,
    };
    if !valid {
        return Err(ParseError::InvalidEnum);
    }

    Ok(Member { name: name.to_owned(), value: value.map(str::to_owned) })
}
