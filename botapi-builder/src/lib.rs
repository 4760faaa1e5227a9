//! Descriptor-driven object builder for Telegram Bot API payloads.
//!
//! Decoded JSON comes in as an untyped [`serde_json::Value`]; the [`Builder`]
//! walks the static [`TypeEntry`] descriptors of the requested type and
//! produces a typed [`Object`], or a [`BuildError`] naming the parameter path
//! that could not be built.
//!
//! The descriptor tables are normally generated at build time (see
//! `botapi-types`), but can be written by hand and registered through a
//! [`StaticRegistry`].
//!
//! # Quick start
//!
//! ```rust
//! use botapi_builder::{Args, Builder, ClassDef, ParamDef, Registered, StaticRegistry};
//! use botapi_builder::{Construct, FromBuilt, RawMap, ToRaw, TypeEntry, ValueDef, construct_with};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i64, y: i64 }
//!
//! impl Registered for Point { const TYPE_NAME: &'static str = "Point"; }
//! impl Construct for Point {
//!     fn construct(args: &mut Args) -> botapi_builder::Result<Self> {
//!         Ok(Self { x: args.take("x")?, y: args.take("y")? })
//!     }
//! }
//! impl ToRaw for Point {
//!     fn to_raw(&self) -> serde_json::Value {
//!         RawMap::new().field("x", &self.x).field("y", &self.y).finish()
//!     }
//! }
//! impl FromBuilt for Point {
//!     fn accepts(value: &botapi_builder::Built) -> bool { value.is::<Self>() }
//!     fn from_built(value: botapi_builder::Built) -> Result<Self, botapi_builder::Built> {
//!         value.downcast()
//!     }
//! }
//!
//! const INT: ValueDef = ValueDef { ty: Some("int"), array_type: None };
//! static POINT: TypeEntry = TypeEntry::Class(ClassDef {
//!     name: "Point",
//!     params: &[
//!         ParamDef { name: "x", value: INT, default: None },
//!         ParamDef { name: "y", value: INT, default: Some(|| json!(0)) },
//!     ],
//!     build_if: None,
//!     construct: construct_with::<Point>,
//! });
//!
//! static REGISTRY: StaticRegistry = StaticRegistry(&[&POINT]);
//!
//! let point: Point = Builder::new(REGISTRY).build_as(&json!({"x": 5})).unwrap();
//! assert_eq!(point, Point { x: 5, y: 0 });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod checker;
mod convert;
mod descriptor;
mod error;
mod raw;
mod value;

pub use builder::Builder;
pub use checker::{AllOf, Checker, FieldEquals, HasField};
pub use convert::FromBuilt;
pub use descriptor::{
    AbstractDef, Args, ArrayType, Backing, Chain, ClassDef, Construct, EnumDef, EnumMember, Literal,
    ParamDef, Registered, Registry, StaticRegistry, TypeEntry, ValueDef, ValueEnum, construct_with,
    nth_variant,
};
pub use error::{BuildError, Result};
pub use raw::{RawMap, ToRaw};
pub use value::{Built, Instance, Key, Object, raw_kind};
