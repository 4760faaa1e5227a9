//! Build script: parse the Bot API schema and generate Rust source code.
//!
//! Updating to a new Bot API version means editing `schema/botapi.schema`
//! and bumping its `// BOT API x.y` header; the rest is automatic.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use botapi_gen::{Config, Outputs, VERSION_PLACEHOLDER, generate};
use botapi_schema::{api_version, ast::Declaration, parse_schema_file};

const SCHEMA: &str = "schema/botapi.schema";

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;

    println!("cargo:rerun-if-changed={SCHEMA}");
    let content = fs::read_to_string(SCHEMA)?;
    let version = api_version(&content).unwrap_or("0.0").to_owned();

    // ── Parse ───────────────────────────────────────────────────────────────
    let mut decls: Vec<Declaration> = Vec::new();
    let mut stderr = io::stderr();
    for result in parse_schema_file(&content) {
        match result {
            Ok(decl) => decls.push(decl),
            Err(e) => {
                writeln!(stderr, "{SCHEMA}: {e}")?;
                return Err(io::Error::new(io::ErrorKind::InvalidData, e.to_string()));
            }
        }
    }

    // ── Build config from features ──────────────────────────────────────────
    let config = Config {
        impl_from_type:         cfg!(feature = "impl-from-type"),
        impl_from_enum:         cfg!(feature = "impl-from-enum"),
        deserializable_methods: cfg!(feature = "deserializable-methods"),
        gen_type_list:          cfg!(feature = "type-list"),
        impl_serde:             cfg!(feature = "impl-serde"),
    };

    // ── Generate code ───────────────────────────────────────────────────────
    let mut outputs = Outputs::from_dir(&out_dir)?;
    generate(&decls, &config, &mut outputs)?;
    outputs.flush()?;

    // Patch the version constant into generated_common.rs
    let common_path = PathBuf::from(&out_dir).join("generated_common.rs");
    let common = fs::read_to_string(&common_path)?;
    let patched = common.replace(
        VERSION_PLACEHOLDER,
        &format!("pub const BOT_API_VERSION: &str = {version:?};"),
    );
    fs::write(&common_path, patched)?;

    Ok(())
}
