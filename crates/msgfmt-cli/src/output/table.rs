//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Coverage data for a single language.
pub struct LanguageCoverage {
    /// Language code (e.g., "es", "fi").
    pub language: String,
    /// Number of source messages translated.
    pub translated: usize,
    /// Paths of missing messages.
    pub missing: Vec<String>,
    /// Paths present in the translation but not in the source.
    pub extra: Vec<String>,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Missing", "Extra"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, source_count),
            lang.missing.len().to_string(),
            lang.extra.len().to_string(),
        ]);
    }

    table
}

/// Format lint warnings as a table of message path and description.
pub fn format_warning_table(rows: &[(String, String, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Message", "Warning"]);

    for (file, message, warning) in rows {
        table.add_row(vec![file.clone(), message.clone(), warning.clone()]);
    }

    table
}
