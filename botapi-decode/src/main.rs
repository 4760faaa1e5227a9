//! botapi-decode: build a Bot API JSON payload into a typed value.
//!
//! # Run
//! ```text
//! echo '{"id":1,"is_bot":true,"first_name":"bot"}' | cargo run -p botapi-decode -- User
//! cargo run -p botapi-decode -- Update update.json
//! cargo run -p botapi-decode -- --many --raw Update updates.json
//! ```
//!
//! Set `RUST_LOG=botapi_builder=trace` to see why union candidates were
//! rejected.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use botapi_builder::{Builder, Built, Registry, ToRaw};
use botapi_types::Schema;
use clap::Parser;
use serde_json::Value;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Registry name of the type to build, e.g. `Update` or `ChatMember`
    type_name: String,
    /// JSON file to read; stdin when omitted
    file: Option<PathBuf>,
    /// The input is a list or map of values, each built on its own
    #[clap(long)]
    many: bool,
    /// Print the re-serialized JSON instead of the `Debug` form
    #[clap(long)]
    raw: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("✗ {e:#}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    let raw: Value = serde_json::from_str(&text).context("input is not valid JSON")?;
    log::debug!("building {} from {} bytes", args.type_name, text.len());
    println!("{}", render(&Builder::new(Schema), args, &raw)?);
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("cannot read stdin")?;
            Ok(text)
        }
    }
}

fn render<R: Registry>(builder: &Builder<R>, args: &Args, raw: &Value) -> Result<String> {
    if !args.many {
        let object = builder.build(&args.type_name, raw, None)?;
        return Ok(if args.raw {
            serde_json::to_string_pretty(&object.to_raw())?
        } else {
            format!("{object:#?}")
        });
    }

    let rows = builder.build_many(&args.type_name, raw)?;
    log::debug!("built {} rows", rows.len());
    if args.raw {
        let list = Built::List(rows.into_iter().map(|(key, obj)| (key, Built::Object(obj))).collect());
        return Ok(serde_json::to_string_pretty(&list.to_raw())?);
    }
    Ok(rows
        .iter()
        .map(|(key, obj)| format!("[{key}] {obj:#?}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(cli: &[&str]) -> Args {
        Args::parse_from(std::iter::once("botapi-decode").chain(cli.iter().copied()))
    }

    fn user() -> Value {
        json!({"id": 1, "is_bot": true, "first_name": "bot"})
    }

    #[test]
    fn parses_flags() {
        let a = args(&["--many", "Update", "updates.json"]);
        assert!(a.many && !a.raw);
        assert_eq!(a.type_name, "Update");
        assert_eq!(a.file.as_deref(), Some(Path::new("updates.json")));
    }

    #[test]
    fn renders_debug_form() {
        let out = render(&Builder::new(Schema), &args(&["User"]), &user()).unwrap();
        assert!(out.contains("User"));
        assert!(out.contains("first_name: \"bot\""));
    }

    #[test]
    fn renders_raw_json() {
        let out = render(&Builder::new(Schema), &args(&["--raw", "User"]), &user()).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), user());
    }

    #[test]
    fn renders_many() {
        let raw = json!([user(), user()]);
        let out = render(&Builder::new(Schema), &args(&["--many", "User"]), &raw).unwrap();
        assert!(out.starts_with("[0] "));
        assert!(out.contains("\n[1] "));

        let out = render(&Builder::new(Schema), &args(&["--many", "--raw", "User"]), &raw).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), raw);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = render(&Builder::new(Schema), &args(&["Nope"]), &user()).unwrap_err();
        assert!(err.to_string().contains("Nope"), "{err}");
    }
}
