//! Implementation of the `msgfmt check` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use msgfmt::lint_resource;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::load_resource_file;
use crate::output::table::format_warning_table;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with non-zero code if any lint warning is reported
    #[arg(long)]
    pub strict: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    id: String,
    messages: usize,
    warnings: Vec<WarningJson>,
}

#[derive(Debug, Serialize)]
struct WarningJson {
    message: String,
    warning: String,
}

/// Run the check command.
///
/// Malformed files abort with a diagnostic; lint warnings are reported and
/// only affect the exit code under `--strict`.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let resource = load_resource_file(path)?;
        let warnings = lint_resource(&resource)
            .iter()
            .map(|w| WarningJson {
                message: w.message().to_string(),
                warning: w.to_string(),
            })
            .collect();
        reports.push(FileReport {
            file: path.display().to_string(),
            id: resource.id.clone(),
            messages: resource.message_paths().len(),
            warnings,
        });
    }

    let warning_count: usize = reports.iter().map(|r| r.warnings.len()).sum();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else {
        for report in &reports {
            println!(
                "{} {} ({}, {} messages)",
                "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                report.file,
                report.id,
                report.messages
            );
        }
        if warning_count > 0 {
            let rows: Vec<(String, String, String)> = reports
                .iter()
                .flat_map(|r| {
                    r.warnings
                        .iter()
                        .map(|w| (r.file.clone(), w.message.clone(), w.warning.clone()))
                })
                .collect();
            println!("\n{}", format_warning_table(&rows));
            println!(
                "{} {} warning(s)",
                "warning:".if_supports_color(Stream::Stdout, |t| t.yellow()),
                warning_count
            );
        }
    }

    if args.strict && warning_count > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
