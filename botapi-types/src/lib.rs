//! Generated Telegram Bot API types, methods, enums and unions.
//!
//! This crate is **auto-generated** from `schema/botapi.schema`.
//! To update for a new Bot API version, edit the schema and rebuild.
//!
//! # Overview
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`types`]   | Concrete types as `struct`s                                       |
//! | [`enums`]   | Abstract types (one variant per inheritor) and value enumerations |
//! | [`unions`]  | Type unions such as `ChatId = int \| string`                      |
//! | [`methods`] | API methods as `struct`s implementing [`BotMethod`]               |
//!
//! Every type is registered in [`Schema`], the registry the object builder
//! resolves names against.
//!
//! # Decoding a payload
//!
//! ```rust
//! use botapi_types::{decode, types};
//! use serde_json::json;
//!
//! let user: types::User = decode(&json!({
//!     "id": 42,
//!     "is_bot": false,
//!     "first_name": "Ada",
//! }))
//! .unwrap();
//! assert_eq!(user.first_name, "Ada");
//! assert_eq!(user.username, None);
//! ```
//!
//! # Updating to a new version
//!
//! 1. Edit `schema/botapi.schema` and bump its `// BOT API x.y` header.
//! 2. `cargo build`: the build script regenerates everything.

#![deny(unsafe_code)]
#![allow(clippy::large_enum_variant)]

mod generated;

#[cfg(feature = "type-list")]
pub use generated::type_names;
pub use generated::{BOT_API_VERSION, Schema, enums, methods, types, unions};

use botapi_builder::{BuildError, Builder, FromBuilt, Registered, ToRaw, ValueDef};
use serde_json::Value;

// ─── Core traits ──────────────────────────────────────────────────────────────

/// Marks a method struct that can be sent to the Bot API.
///
/// The request body is the method's [`ToRaw`] form; `Return` is the type
/// the `result` field of a successful response decodes into.
pub trait BotMethod: ToRaw {
    /// The method name as used in the request URL, e.g. `"sendMessage"`.
    const NAME: &'static str;
    /// Declared type of the method's result.
    const RETURNS: ValueDef;
    /// The decoded result type.
    type Return: FromBuilt;

    /// Decode the raw `result` of a response to this method.
    fn parse_result(raw: &Value) -> Result<Self::Return, BuildError> {
        let built = Builder::new(Schema).build_value(&Self::RETURNS, raw, Self::NAME)?;
        <Self::Return as FromBuilt>::from_built(built).map_err(|v| {
            BuildError::at(Self::NAME, format_args!("a built {} does not fit the result type", v.kind()))
        })
    }
}

/// Build a registered type from raw JSON using [`Schema`].
pub fn decode<T: Registered + FromBuilt>(raw: &Value) -> Result<T, BuildError> {
    Builder::new(Schema).build_as(raw)
}
