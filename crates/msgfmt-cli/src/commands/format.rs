//! Implementation of the `msgfmt format` command.

use std::collections::HashMap;
use std::path::PathBuf;

use miette::{miette, IntoDiagnostic};
use msgfmt::{FormatError, MessageFormat, Value};
use serde::Serialize;
use tracing::debug;

use crate::output::load_resource_file;

/// Arguments for the format command.
#[derive(Debug, clap::Args)]
pub struct FormatArgs {
    /// Resource files to load (.json, repeatable)
    #[arg(short, long = "resource", required = true)]
    pub resources: Vec<PathBuf>,

    /// Resource id to format from. Defaults to the first loaded resource.
    #[arg(long)]
    pub id: Option<String>,

    /// Locale tags in preference order (repeatable)
    #[arg(short, long = "locale", default_value = "en")]
    pub locales: Vec<String>,

    /// Variables in name=value format (repeatable). Values are parsed as JSON
    /// when possible and used as strings otherwise.
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Print formatted parts instead of a string
    #[arg(long)]
    pub parts: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Dotted path of the message to format (e.g. browser.firefox.genitive)
    pub path: String,
}

/// JSON output for format results.
#[derive(Serialize)]
pub struct FormatResult {
    pub result: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Interpret a parameter value as JSON, falling back to a plain string.
fn parse_value(raw: String) -> Value {
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => value,
        Err(_) => Value::from(raw),
    }
}

/// Run the format command.
pub fn run_format(args: FormatArgs) -> miette::Result<i32> {
    let mut mf = MessageFormat::builder().locales(args.locales).build();

    let mut first_id = None;
    for path in &args.resources {
        let resource = load_resource_file(path)?;
        debug!(id = %resource.id, path = %path.display(), "loaded resource");
        first_id.get_or_insert_with(|| resource.id.clone());
        mf.add_resource(resource);
    }
    let id = args
        .id
        .or(first_id)
        .ok_or_else(|| miette!("no resources loaded"))?;

    let vars: HashMap<String, Value> = args
        .params
        .into_iter()
        .map(|(name, raw)| (name, parse_value(raw)))
        .collect();
    let path: Vec<&str> = args.path.split('.').collect();

    let result = if args.parts {
        mf.format_to_parts(&id, &path, vars)
            .map(|parts| serde_json::to_string_pretty(&parts))
    } else if args.json {
        mf.format(&id, &path, vars)
            .map(|text| serde_json::to_string_pretty(&FormatResult { result: text }))
    } else {
        mf.format(&id, &path, vars).map(Ok)
    };

    match result {
        Ok(text) => {
            println!("{}", text.into_diagnostic()?);
            Ok(exitcode::OK)
        }
        Err(e) => {
            report_error(&e, args.json)?;
            Ok(exitcode::DATAERR)
        }
    }
}

fn report_error(e: &FormatError, json: bool) -> miette::Result<()> {
    if json {
        let output = serde_json::json!({ "error": e.to_string() });
        eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        eprintln!("Format error: {}", e);
    }
    Ok(())
}
