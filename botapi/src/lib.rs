//! # botapi — typed Telegram Bot API objects
//!
//! `botapi` turns the untyped JSON the Bot API sends into typed Rust values.
//! It consists of focused sub-crates wired together here for convenience:
//!
//! | Sub-crate        | Role                                                  |
//! |------------------|-------------------------------------------------------|
//! | `botapi-schema`  | Parse `.schema` files into an AST                     |
//! | `botapi-gen`     | Generate Rust source from the AST (build-time)        |
//! | `botapi-builder` | The descriptor-driven object builder                  |
//! | `botapi-types`   | Auto-generated types, enums, unions and methods       |
//!
//! ## Quick start
//!
//! ```rust
//! use botapi::{BotMethod, ToRaw, decode, tl::{enums, methods, types, unions}};
//! use serde_json::json;
//!
//! // Decode an incoming update.
//! let update: types::Update = decode(&json!({
//!     "update_id": 1,
//!     "message": {
//!         "message_id": 5,
//!         "date": 0,
//!         "chat": {"id": 7, "type": "private"},
//!         "text": "hello",
//!     },
//! }))
//! .unwrap();
//! let chat = update.message.unwrap().chat;
//! assert_eq!(chat.r#type, enums::ChatType::Private);
//!
//! // Build a request and read its result.
//! let request = methods::SendMessage {
//!     chat_id: unions::ChatId::Int(chat.id),
//!     message_thread_id: None,
//!     text: "hi".into(),
//!     parse_mode: None,
//!     entities: None,
//!     disable_notification: None,
//!     protect_content: None,
//!     reply_markup: None,
//! };
//! assert_eq!(methods::SendMessage::NAME, "sendMessage");
//! assert_eq!(request.to_raw(), json!({"chat_id": 7, "text": "hi"}));
//! ```
//!
//! ## Updating the Bot API version
//!
//! Edit `botapi-types/schema/botapi.schema` and run `cargo build`.
//! Everything else regenerates automatically.

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Re-export of [`botapi_types`]: generated types, enums, unions and methods.
pub use botapi_types as tl;

/// Re-export of [`botapi_builder`]: the object builder and descriptor types.
pub use botapi_builder as builder;

/// Re-export of [`botapi_schema`] (requires `feature = "parser"`).
#[cfg(feature = "parser")]
pub use botapi_schema as parser;

/// Re-export of [`botapi_gen`] (requires `feature = "codegen"`).
#[cfg(feature = "codegen")]
pub use botapi_gen as codegen;

// ─── Convenience re-exports ───────────────────────────────────────────────────

pub use botapi_builder::{BuildError, Builder, FromBuilt, Registered, ToRaw};
pub use botapi_types::{BOT_API_VERSION, BotMethod, Schema, decode};
