//! CLI command implementations.

mod check;
mod coverage;
mod format;

pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use format::{run_format, FormatArgs};
