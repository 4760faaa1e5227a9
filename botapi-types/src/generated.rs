//! Code generated from `schema/botapi.schema` by the build script.

#![allow(missing_docs)]
#![allow(clippy::all)]

include!(concat!(env!("OUT_DIR"), "/generated_common.rs"));
include!(concat!(env!("OUT_DIR"), "/generated_types.rs"));
include!(concat!(env!("OUT_DIR"), "/generated_enums.rs"));
include!(concat!(env!("OUT_DIR"), "/generated_unions.rs"));
include!(concat!(env!("OUT_DIR"), "/generated_methods.rs"));
