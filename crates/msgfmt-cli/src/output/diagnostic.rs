//! Miette diagnostic wrapper for resource load errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::fs::read_to_string;
use std::path::Path;

use miette::{miette, Diagnostic, NamedSource, SourceSpan};
use msgfmt::interpreter::parse_resource;
use msgfmt::{LoadError, Resource};
use thiserror::Error;

/// A miette-compatible diagnostic for malformed resource files.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid resource: {message}")]
#[diagnostic(code(msgfmt::resource))]
pub struct ResourceDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl ResourceDiagnostic {
    /// Create a diagnostic from a parse error location with source context.
    pub fn from_location(
        path: &Path,
        content: &str,
        line: usize,
        column: usize,
        message: &str,
    ) -> Self {
        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        ResourceDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: message.to_string(),
            help: Some(
                "resources are JSON objects with \"id\", \"locale\" and \"entries\"".to_string(),
            ),
        }
    }
}

/// Read and parse a resource file, reporting syntax errors against its source.
pub fn load_resource_file(path: &Path) -> miette::Result<Resource> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read resource file {}: {}", path.display(), e))?;
    match parse_resource(&content, path) {
        Ok(resource) => Ok(resource),
        Err(LoadError::Parse {
            line,
            column,
            message,
            ..
        }) => Err(
            ResourceDiagnostic::from_location(path, &content, line, column, &message).into(),
        ),
        Err(e) => Err(miette!("{}", e)),
    }
}
