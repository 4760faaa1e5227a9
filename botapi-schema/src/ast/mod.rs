//! Rust types representing the Abstract Syntax Tree of a schema file.

mod alias;
mod category;
mod check;
mod definition;
mod enumeration;
mod parameter;
mod parameter_type;
pub(crate) mod ty;

pub use alias::Alias;
pub use category::Category;
pub use check::Check;
pub use definition::Definition;
pub use enumeration::{Backing, Enumeration, Member};
pub use parameter::Parameter;
pub use parameter_type::ParameterType;
pub use ty::{SCALARS, Type, TypeExpr};

/// One top-level declaration of a schema file.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    /// A type or method definition.
    Definition(Definition),
    /// A value enumeration (`---enums---`).
    Enum(Enumeration),
    /// A named type union (`---unions---`).
    Alias(Alias),
}
