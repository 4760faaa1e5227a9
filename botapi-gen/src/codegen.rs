//! The public code-generation API.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use botapi_schema::ast::{Backing, Category, Check, Declaration, Definition, Enumeration, Parameter, Type};

use crate::grouper;
use crate::metadata::{Field, Metadata, invalid};
use crate::namegen as n;

// ─── Config ───────────────────────────────────────────────────────────────────

/// Generation configuration.
pub struct Config {
    /// Emit `From<types::Foo> for enums::Bar` impls.
    pub impl_from_type: bool,
    /// Emit `TryFrom<enums::Bar> for types::Foo` impls.
    pub impl_from_enum: bool,
    /// Also make method structs buildable and register them (useful for
    /// servers and request inspection).
    pub deserializable_methods: bool,
    /// Emit `type_names() -> &'static [&'static str]` in the common module.
    pub gen_type_list: bool,
    /// Derive `serde::{Serialize, Deserialize}` on all types.
    pub impl_serde: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            impl_from_type: true,
            impl_from_enum: true,
            deserializable_methods: false,
            gen_type_list: false,
            impl_serde: false,
        }
    }
}

// ─── Outputs ─────────────────────────────────────────────────────────────────

/// Writers for each generated Rust module.
pub struct Outputs<W: Write> {
    /// Receives the version constant, the registry and its entries.
    pub common: W,
    /// Receives `pub mod types { … }` (concrete types as structs).
    pub types: W,
    /// Receives `pub mod enums { … }` (abstract types and value enums).
    pub enums: W,
    /// Receives `pub mod unions { … }` (named and inline type unions).
    pub unions: W,
    /// Receives `pub mod methods { … }` (API methods as structs).
    pub methods: W,
}

impl Outputs<File> {
    /// Convenience constructor that opens files inside `out_dir`.
    pub fn from_dir(out_dir: &str) -> io::Result<Self> {
        let p = Path::new(out_dir);
        Ok(Self {
            common:  File::create(p.join("generated_common.rs"))?,
            types:   File::create(p.join("generated_types.rs"))?,
            enums:   File::create(p.join("generated_enums.rs"))?,
            unions:  File::create(p.join("generated_unions.rs"))?,
            methods: File::create(p.join("generated_methods.rs"))?,
        })
    }
}

impl<W: Write> Outputs<W> {
    /// Flush all writers.
    pub fn flush(&mut self) -> io::Result<()> {
        self.common.flush()?;
        self.types.flush()?;
        self.enums.flush()?;
        self.unions.flush()?;
        self.methods.flush()
    }
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// The line `build.rs` replaces with the real version.
pub const VERSION_PLACEHOLDER: &str = "pub const BOT_API_VERSION: &str = \"0.0\"; // update via build.rs";

/// Generate Rust source code from a slice of parsed schema declarations.
///
/// Every type reference is validated first; an unknown type, a `Vector`
/// inside a union or an unparsable default yields an
/// [`io::ErrorKind::InvalidData`] error before anything is written.
/// Call `outputs.flush()` when done.
pub fn generate<W: Write>(
    decls: &[Declaration],
    config: &Config,
    outputs: &mut Outputs<W>,
) -> io::Result<()> {
    let meta = Metadata::build(decls)?;
    for def in grouper::definitions(decls, Category::Types) {
        for check in &def.checks {
            checker(check).map_err(|e| invalid(format!("{}: {e}", def.name)))?;
        }
    }

    write_common(decls, config, &meta, &mut outputs.common)?;
    write_types_mod(decls, config, &meta, &mut outputs.types)?;
    write_enums_mod(decls, config, &meta, &mut outputs.enums)?;
    write_unions_mod(config, &meta, &mut outputs.unions)?;
    write_methods_mod(decls, config, &meta, &mut outputs.methods)?;

    Ok(())
}

// ─── Common module ────────────────────────────────────────────────────────────

/// One registry entry: lookup name and the `static` holding it.
struct Entry {
    name: String,
    ident: String,
}

fn registry_entries(decls: &[Declaration], config: &Config, meta: &Metadata<'_>) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();
    for e in grouper::enumerations(decls) {
        entries.push(Entry { name: e.name.clone(), ident: n::static_name(&e.name) });
    }
    for def in grouper::definitions(decls, Category::Types) {
        let name = n::def_type_name(def);
        entries.push(Entry { ident: n::static_name(&name), name });
    }
    for (name, _) in meta.abstracts() {
        entries.push(Entry { name: name.to_owned(), ident: n::static_name(name) });
    }
    if config.deserializable_methods {
        for def in grouper::definitions(decls, Category::Methods) {
            entries.push(Entry { name: n::def_type_name(def), ident: n::method_static_name(def) });
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

fn write_common<'a, W: Write>(
    decls: &'a [Declaration],
    config: &Config,
    meta: &Metadata<'a>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "// @generated, do not edit by hand")?;
    writeln!(out, "// Re-run the build script to regenerate.")?;
    writeln!(out)?;
    writeln!(out, "/// The Bot API version this code was generated from.")?;
    writeln!(out, "{VERSION_PLACEHOLDER}")?;
    writeln!(out)?;

    let entries = registry_entries(decls, config, meta);

    writeln!(out, "/// Registry of every generated type, by schema name.")?;
    writeln!(out, "///")?;
    writeln!(out, "/// Pass it to [`botapi_builder::Builder::new`] to build typed values.")?;
    writeln!(out, "#[derive(Clone, Copy, Debug, Default)]")?;
    writeln!(out, "pub struct Schema;")?;
    writeln!(out)?;
    writeln!(out, "impl botapi_builder::Registry for Schema {{")?;
    writeln!(out, "    fn lookup(&self, name: &str) -> Option<&'static botapi_builder::TypeEntry> {{")?;
    writeln!(out, "        Some(match name {{")?;
    for entry in &entries {
        writeln!(out, "            {:?} => &entries::{},", entry.name, entry.ident)?;
    }
    writeln!(out, "            _ => return None,")?;
    writeln!(out, "        }})")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    if config.gen_type_list {
        writeln!(out)?;
        writeln!(out, "/// Every name [`Schema`] resolves, sorted.")?;
        writeln!(out, "pub fn type_names() -> &'static [&'static str] {{")?;
        writeln!(out, "    &[")?;
        for entry in &entries {
            writeln!(out, "        {:?},", entry.name)?;
        }
        writeln!(out, "    ]")?;
        writeln!(out, "}}")?;
    }

    writeln!(out)?;
    writeln!(out, "pub(crate) mod entries {{")?;

    for e in grouper::enumerations(decls) {
        write_enum_entry(out, e)?;
    }
    for def in grouper::definitions(decls, Category::Types) {
        let name = n::def_type_name(def);
        let fields = resolve_fields(def, meta)?;
        let build_if = match def.checks.as_slice() {
            [] => "None".to_owned(),
            [only] => format!("Some(&{})", checker(only)?),
            many => {
                let all = many
                    .iter()
                    .map(|c| Ok(format!("&{} as &dyn botapi_builder::Checker", checker(c)?)))
                    .collect::<io::Result<Vec<_>>>()?;
                format!("Some(&botapi_builder::AllOf(&[{}]))", all.join(", "))
            }
        };
        write_class_entry(
            out,
            &n::static_name(&name),
            &name,
            &fields,
            &build_if,
            &format!("crate::types::{name}"),
        )?;
    }
    for (name, inheritors) in meta.abstracts() {
        let names: Vec<String> = inheritors.iter().map(|d| format!("{:?}", n::def_type_name(d))).collect();
        writeln!(out)?;
        writeln!(
            out,
            "    pub(crate) static {}: botapi_builder::TypeEntry = botapi_builder::TypeEntry::Abstract(botapi_builder::AbstractDef {{",
            n::static_name(name)
        )?;
        writeln!(out, "        name: {name:?},")?;
        writeln!(out, "        inheritors: &[{}],", names.join(", "))?;
        writeln!(out, "    }});")?;
    }
    if config.deserializable_methods {
        for def in grouper::definitions(decls, Category::Methods) {
            let fields = resolve_fields(def, meta)?;
            write_class_entry(
                out,
                &n::method_static_name(def),
                &n::def_type_name(def),
                &fields,
                "None",
                &format!("crate::methods::{}", n::def_type_name(def)),
            )?;
        }
    }

    writeln!(out, "}}")
}

/// Rust expression for a `botapi_builder::Literal` parsed from JSON text.
fn literal(text: &str) -> io::Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| invalid(format!("invalid literal {text}: {e}")))?;
    Ok(match value {
        serde_json::Value::Null => "botapi_builder::Literal::Null".to_owned(),
        serde_json::Value::Bool(b) => format!("botapi_builder::Literal::Bool({b})"),
        serde_json::Value::Number(n) if n.is_i64() => format!("botapi_builder::Literal::Int({n})"),
        serde_json::Value::String(s) => format!("botapi_builder::Literal::Str({s:?})"),
        _ => return Err(invalid(format!("check value {text} must be a string, integer, bool or null"))),
    })
}

/// Rust expression for the checker of one build check.
fn checker(check: &Check) -> io::Result<String> {
    Ok(match &check.value {
        None => format!("botapi_builder::HasField({:?})", check.field),
        Some(text) => format!(
            "botapi_builder::FieldEquals {{ field: {:?}, value: {} }}",
            check.field,
            literal(text)?
        ),
    })
}

fn value_def(field: &Field) -> String {
    let ty = match &field.decl {
        Some(decl) => format!("Some({decl:?})"),
        None => "None".to_owned(),
    };
    let array_type = match &field.array_type {
        Some(expr) => format!("Some({expr})"),
        None => "None".to_owned(),
    };
    format!("botapi_builder::ValueDef {{ ty: {ty}, array_type: {array_type} }}")
}

fn write_class_entry<W: Write>(
    out: &mut W,
    ident: &str,
    name: &str,
    fields: &[(&Parameter, Field)],
    build_if: &str,
    rust_path: &str,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "    static PARAMS_{ident}: [botapi_builder::ParamDef; {}] = [", fields.len())?;
    for (param, field) in fields {
        let default = match &field.default {
            Some(json) => format!("Some(|| serde_json::json!({json}))"),
            None => "None".to_owned(),
        };
        writeln!(out, "        botapi_builder::ParamDef {{")?;
        writeln!(out, "            name: {:?},", param.name)?;
        writeln!(out, "            value: {},", value_def(field))?;
        writeln!(out, "            default: {default},")?;
        writeln!(out, "        }},")?;
    }
    writeln!(out, "    ];")?;
    writeln!(
        out,
        "    pub(crate) static {ident}: botapi_builder::TypeEntry = botapi_builder::TypeEntry::Class(botapi_builder::ClassDef {{"
    )?;
    writeln!(out, "        name: {name:?},")?;
    writeln!(out, "        params: &PARAMS_{ident},")?;
    writeln!(out, "        build_if: {build_if},")?;
    writeln!(out, "        construct: botapi_builder::construct_with::<{rust_path}>,")?;
    writeln!(out, "    }});")
}

fn write_enum_entry<W: Write>(out: &mut W, e: &Enumeration) -> io::Result<()> {
    let backing = match e.backing {
        Backing::Name => "Name",
        Backing::String => "String",
        Backing::Int => "Int",
    };
    writeln!(out)?;
    writeln!(
        out,
        "    pub(crate) static {}: botapi_builder::TypeEntry = botapi_builder::TypeEntry::Enum(botapi_builder::EnumDef {{",
        n::static_name(&e.name)
    )?;
    writeln!(out, "        name: {:?},", e.name)?;
    writeln!(out, "        backing: botapi_builder::Backing::{backing},")?;
    writeln!(out, "        members: &[")?;
    for m in &e.members {
        let value = match e.backing {
            Backing::Name => "botapi_builder::Literal::Null".to_owned(),
            Backing::String => format!("botapi_builder::Literal::Str({:?})", m.string_value()),
            Backing::Int => match m.int_value() {
                Some(v) => format!("botapi_builder::Literal::Int({v})"),
                None => return Err(invalid(format!("{}::{} has no integer value", e.name, m.name))),
            },
        };
        writeln!(out, "            botapi_builder::EnumMember {{ name: {:?}, value: {value} }},", m.name)?;
    }
    writeln!(out, "        ],")?;
    writeln!(out, "        construct: botapi_builder::nth_variant::<crate::enums::{}>,", e.name)?;
    writeln!(out, "    }});")
}

// ─── Struct generation (types + methods) ──────────────────────────────────────

fn resolve_fields<'a>(def: &'a Definition, meta: &Metadata<'a>) -> io::Result<Vec<(&'a Parameter, Field)>> {
    def.params
        .iter()
        .map(|p| meta.resolve_param(def, p).map(|f| (p, f)))
        .collect()
}

fn write_types_mod<'a, W: Write>(
    decls: &'a [Declaration],
    config: &Config,
    meta: &Metadata<'a>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "// @generated, do not edit by hand")?;
    writeln!(out, "pub mod types {{")?;

    for def in grouper::definitions(decls, Category::Types) {
        let name = n::def_type_name(def);
        let fields = resolve_fields(def, meta)?;
        write_struct(out, def, &fields, config)?;
        write_registered(out, &name, &name)?;
        write_construct(out, &name, &fields)?;
        write_from_built_downcast(out, &name)?;
        write_struct_to_raw(out, &name, &fields)?;
    }

    writeln!(out, "}}")
}

fn write_methods_mod<'a, W: Write>(
    decls: &'a [Declaration],
    config: &Config,
    meta: &Metadata<'a>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "// @generated, do not edit by hand")?;
    writeln!(out, "pub mod methods {{")?;

    for def in grouper::definitions(decls, Category::Methods) {
        let name = n::def_type_name(def);
        let fields = resolve_fields(def, meta)?;
        let ret = meta.resolve_return(def)?;
        write_struct(out, def, &fields, config)?;
        write_registered(out, &name, &name)?;
        writeln!(out, "    impl crate::BotMethod for {name} {{")?;
        writeln!(out, "        const NAME: &'static str = {:?};", def.name)?;
        writeln!(out, "        const RETURNS: botapi_builder::ValueDef = {};", value_def(&ret))?;
        writeln!(out, "        type Return = {};", ret.rust)?;
        writeln!(out, "    }}")?;
        write_struct_to_raw(out, &name, &fields)?;
        if config.deserializable_methods {
            write_construct(out, &name, &fields)?;
            write_from_built_downcast(out, &name)?;
        }
    }

    writeln!(out, "}}")
}

fn write_struct<W: Write>(
    out: &mut W,
    def: &Definition,
    fields: &[(&Parameter, Field)],
    config: &Config,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "    /// `{def}`")?;
    writeln!(out, "    #[derive(Clone, Debug, PartialEq)]")?;
    if config.impl_serde {
        writeln!(out, "    #[derive(serde::Serialize, serde::Deserialize)]")?;
    }
    writeln!(out, "    pub struct {} {{", n::def_type_name(def))?;
    for (param, field) in fields {
        let attr = n::param_attr_name(param);
        if config.impl_serde && attr.trim_start_matches("r#") != param.name {
            writeln!(out, "        #[serde(rename = {:?})]", param.name)?;
        }
        writeln!(out, "        pub {attr}: {},", field.rust)?;
    }
    writeln!(out, "    }}")
}

fn write_registered<W: Write>(out: &mut W, rust_name: &str, registry_name: &str) -> io::Result<()> {
    writeln!(out, "    impl botapi_builder::Registered for {rust_name} {{")?;
    writeln!(out, "        const TYPE_NAME: &'static str = {registry_name:?};")?;
    writeln!(out, "    }}")
}

fn write_construct<W: Write>(out: &mut W, rust_name: &str, fields: &[(&Parameter, Field)]) -> io::Result<()> {
    // Field-less structs never read from `args`.
    let args = if fields.is_empty() { "_args" } else { "args" };
    writeln!(out, "    impl botapi_builder::Construct for {rust_name} {{")?;
    writeln!(
        out,
        "        fn construct({args}: &mut botapi_builder::Args) -> botapi_builder::Result<Self> {{"
    )?;
    writeln!(out, "            Ok(Self {{")?;
    for (param, _) in fields {
        writeln!(out, "                {}: args.take({:?})?,", n::param_attr_name(param), param.name)?;
    }
    writeln!(out, "            }})")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

fn write_from_built_downcast<W: Write>(out: &mut W, rust_name: &str) -> io::Result<()> {
    writeln!(out, "    impl botapi_builder::FromBuilt for {rust_name} {{")?;
    writeln!(out, "        fn accepts(value: &botapi_builder::Built) -> bool {{")?;
    writeln!(out, "            value.is::<Self>()")?;
    writeln!(out, "        }}")?;
    writeln!(out)?;
    writeln!(
        out,
        "        fn from_built(value: botapi_builder::Built) -> Result<Self, botapi_builder::Built> {{"
    )?;
    writeln!(out, "            value.downcast()")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

fn write_struct_to_raw<W: Write>(out: &mut W, rust_name: &str, fields: &[(&Parameter, Field)]) -> io::Result<()> {
    writeln!(out, "    impl botapi_builder::ToRaw for {rust_name} {{")?;
    writeln!(out, "        fn to_raw(&self) -> serde_json::Value {{")?;
    writeln!(out, "            botapi_builder::RawMap::new()")?;
    for (param, field) in fields {
        let method = if field.optional { "optional" } else { "field" };
        writeln!(out, "                .{method}({:?}, &self.{})", param.name, n::param_attr_name(param))?;
    }
    writeln!(out, "                .finish()")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

// ─── Enum generation ──────────────────────────────────────────────────────────

fn write_enums_mod<W: Write>(
    decls: &[Declaration],
    config: &Config,
    meta: &Metadata<'_>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "// @generated, do not edit by hand")?;
    writeln!(out, "pub mod enums {{")?;

    for (name, inheritors) in meta.abstracts() {
        write_abstract_enum(out, name, inheritors, config)?;
    }
    for e in grouper::enumerations(decls) {
        write_value_enum(out, e, config)?;
    }

    writeln!(out, "}}")
}

fn write_abstract_enum<W: Write>(
    out: &mut W,
    name: &str,
    inheritors: &[&Definition],
    config: &Config,
) -> io::Result<()> {
    let variants: Vec<(String, String)> = inheritors
        .iter()
        .map(|d| (n::def_variant_name(d, name), format!("crate::types::{}", n::def_type_name(d))))
        .collect();

    writeln!(out)?;
    writeln!(out, "    /// Abstract `{name}`: one of its {} inheritors.", variants.len())?;
    writeln!(out, "    #[derive(Clone, Debug, PartialEq)]")?;
    if config.impl_serde {
        writeln!(out, "    #[derive(serde::Serialize, serde::Deserialize)]")?;
        writeln!(out, "    #[serde(untagged)]")?;
    }
    writeln!(out, "    pub enum {name} {{")?;
    for (variant, path) in &variants {
        writeln!(out, "        {variant}({path}),")?;
    }
    writeln!(out, "    }}")?;
    write_registered(out, name, name)?;
    write_variants_from_built(out, name, &variants)?;
    write_variants_to_raw(out, name, &variants)?;

    for (variant, path) in &variants {
        if config.impl_from_type {
            write_from_variant(out, name, variant, path)?;
        }
        if config.impl_from_enum {
            writeln!(out, "    impl TryFrom<{name}> for {path} {{")?;
            writeln!(out, "        type Error = {name};")?;
            writeln!(out)?;
            writeln!(out, "        fn try_from(value: {name}) -> Result<Self, Self::Error> {{")?;
            writeln!(out, "            match value {{")?;
            writeln!(out, "                {name}::{variant}(x) => Ok(x),")?;
            writeln!(out, "                #[allow(unreachable_patterns)]")?;
            writeln!(out, "                other => Err(other),")?;
            writeln!(out, "            }}")?;
            writeln!(out, "        }}")?;
            writeln!(out, "    }}")?;
        }
    }
    Ok(())
}

/// `FromBuilt` trying each `(variant, type)` in order.
fn write_variants_from_built<W: Write>(out: &mut W, name: &str, variants: &[(String, String)]) -> io::Result<()> {
    writeln!(out, "    impl botapi_builder::FromBuilt for {name} {{")?;
    writeln!(out, "        fn accepts(value: &botapi_builder::Built) -> bool {{")?;
    let accepts: Vec<String> = variants.iter().map(|(v, path)| accepts_expr(v, path)).collect();
    writeln!(out, "            {}", accepts.join("\n                || "))?;
    writeln!(out, "        }}")?;
    writeln!(out)?;
    writeln!(
        out,
        "        fn from_built(value: botapi_builder::Built) -> Result<Self, botapi_builder::Built> {{"
    )?;
    for (variant, path) in variants {
        if variant == "Array" && path == "serde_json::Value" {
            writeln!(out, "            let value = match value {{")?;
            writeln!(
                out,
                "                botapi_builder::Built::Raw(v @ (serde_json::Value::Array(_) | serde_json::Value::Object(_))) => return Ok(Self::Array(v)),"
            )?;
            writeln!(out, "                other => other,")?;
            writeln!(out, "            }};")?;
        } else {
            writeln!(out, "            let value = match <{path} as botapi_builder::FromBuilt>::from_built(value) {{")?;
            writeln!(out, "                Ok(x) => return Ok(Self::{variant}(x)),")?;
            writeln!(out, "                Err(v) => v,")?;
            writeln!(out, "            }};")?;
        }
    }
    writeln!(out, "            Err(value)")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

fn accepts_expr(variant: &str, path: &str) -> String {
    if variant == "Array" && path == "serde_json::Value" {
        // Untyped arrays are any raw list or map, never a scalar.
        "matches!(value, botapi_builder::Built::Raw(serde_json::Value::Array(_) | serde_json::Value::Object(_)))"
            .to_owned()
    } else {
        format!("<{path} as botapi_builder::FromBuilt>::accepts(value)")
    }
}

fn write_variants_to_raw<W: Write>(out: &mut W, name: &str, variants: &[(String, String)]) -> io::Result<()> {
    writeln!(out, "    impl botapi_builder::ToRaw for {name} {{")?;
    writeln!(out, "        fn to_raw(&self) -> serde_json::Value {{")?;
    writeln!(out, "            match self {{")?;
    for (variant, _) in variants {
        writeln!(out, "                Self::{variant}(x) => botapi_builder::ToRaw::to_raw(x),")?;
    }
    writeln!(out, "            }}")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

fn write_from_variant<W: Write>(out: &mut W, name: &str, variant: &str, path: &str) -> io::Result<()> {
    writeln!(out, "    impl From<{path}> for {name} {{")?;
    writeln!(out, "        fn from(x: {path}) -> Self {{")?;
    writeln!(out, "            Self::{variant}(x)")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

fn write_value_enum<W: Write>(out: &mut W, e: &Enumeration, config: &Config) -> io::Result<()> {
    let name = &e.name;
    writeln!(out)?;
    writeln!(out, "    /// `{e}`")?;
    writeln!(out, "    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]")?;
    if config.impl_serde {
        writeln!(out, "    #[derive(serde::Serialize, serde::Deserialize)]")?;
    }
    writeln!(out, "    pub enum {name} {{")?;
    for m in &e.members {
        if config.impl_serde && e.backing != Backing::Int {
            writeln!(out, "        #[serde(rename = {:?})]", m.string_value())?;
        }
        writeln!(out, "        {},", n::enum_member_name(&m.name))?;
    }
    writeln!(out, "    }}")?;
    write_registered(out, name, name)?;

    let variants: Vec<String> = e.members.iter().map(|m| format!("Self::{}", n::enum_member_name(&m.name))).collect();
    writeln!(out, "    impl botapi_builder::ValueEnum for {name} {{")?;
    writeln!(out, "        const VARIANTS: &'static [Self] = &[{}];", variants.join(", "))?;
    writeln!(out, "    }}")?;

    writeln!(out, "    impl botapi_builder::ToRaw for {name} {{")?;
    writeln!(out, "        fn to_raw(&self) -> serde_json::Value {{")?;
    writeln!(out, "            match self {{")?;
    for (m, variant) in e.members.iter().zip(&variants) {
        let raw = match e.backing {
            Backing::Name => format!("{:?}", m.name),
            Backing::String => format!("{:?}", m.string_value()),
            Backing::Int => format!("{}i64", m.int_value().unwrap_or_default()),
        };
        writeln!(out, "                {variant} => serde_json::Value::from({raw}),")?;
    }
    writeln!(out, "            }}")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    write_from_built_downcast(out, name)
}

// ─── Union generation ─────────────────────────────────────────────────────────

fn write_unions_mod<W: Write>(config: &Config, meta: &Metadata<'_>, out: &mut W) -> io::Result<()> {
    writeln!(out, "// @generated, do not edit by hand")?;
    writeln!(out, "pub mod unions {{")?;

    for (name, members) in meta.unions() {
        write_union(out, name, members, config, meta)?;
    }

    writeln!(out, "}}")
}

fn write_union<W: Write>(
    out: &mut W,
    name: &str,
    members: &[&Type],
    config: &Config,
    meta: &Metadata<'_>,
) -> io::Result<()> {
    let mut variants: Vec<(String, String)> = Vec::new();
    for m in members {
        let variant = n::union_variant_name(m);
        // `float|double` collapse into one variant.
        if !variants.iter().any(|(v, _)| *v == variant) {
            variants.push((variant, meta.member_path(m)));
        }
    }
    let spelled: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();

    writeln!(out)?;
    writeln!(out, "    /// `{}`", spelled.join("|"))?;
    writeln!(out, "    #[derive(Clone, Debug, PartialEq)]")?;
    if config.impl_serde {
        writeln!(out, "    #[derive(serde::Serialize, serde::Deserialize)]")?;
        writeln!(out, "    #[serde(untagged)]")?;
    }
    writeln!(out, "    pub enum {name} {{")?;
    for (variant, path) in &variants {
        writeln!(out, "        {variant}({path}),")?;
    }
    writeln!(out, "    }}")?;
    write_variants_from_built(out, name, &variants)?;
    write_variants_to_raw(out, name, &variants)?;
    for (variant, path) in &variants {
        write_from_variant(out, name, variant, path)?;
    }
    Ok(())
}
