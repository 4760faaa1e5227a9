//! Build-time code generator that transforms a parsed Bot API schema into
//! Rust source files.
//!
//! Intended to be used from a `build.rs` script. The generated code targets
//! `botapi-builder`: every concrete type gets a registry entry and the
//! conversions the builder needs.
//!
//! # Usage
//!
//! ```no_run
//! // build.rs
//! use botapi_gen::{Config, Outputs, generate};
//! use botapi_schema::parse_schema_file;
//! use std::fs;
//!
//! fn main() {
//!     let schema = fs::read_to_string("schema/botapi.schema").unwrap();
//!     let decls: Vec<_> = parse_schema_file(&schema)
//!         .filter_map(|r| r.ok())
//!         .collect();
//!
//!     let out = std::env::var("OUT_DIR").unwrap();
//!     let mut outputs = Outputs::from_dir(&out).unwrap();
//!     generate(&decls, &Config::default(), &mut outputs).unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod grouper;
mod metadata;
mod namegen;
pub mod codegen;

pub use codegen::{Config, Outputs, VERSION_PLACEHOLDER, generate};
