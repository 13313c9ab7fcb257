//! Code statistics reporting.
//!
//! Turns the output of an external line-counting tool (`cloc`) into the
//! manuscript's code-statistics artifacts: a LaTeX table, a delimited data
//! file and a pie chart of code-line shares.
//!
//! The tool is invoked twice over the same tree, once excluding test-like
//! directories and once restricted to them, so the aggregate row of the
//! package's implementation language can be split into API, test and
//! docstring categories.

pub mod chart;
pub mod cloc;
pub mod records;
pub mod render;

pub use chart::{render_pie, ChartConfig};
pub use cloc::{parse_table, run_cloc, TestScope};
pub use records::{chart_slices, split_language, LanguageCount, Slice, StatsReport};
pub use render::{
    data_file, latex_table, parse_data_file, read_data_file, write_data_file, write_latex_table,
};

use std::path::Path;

use crate::Result;

/// Run the counting tool over `src` and build the combined report.
///
/// `split_language` names the aggregate row replaced by the derived
/// `<lang> API` / `<lang> Tests` / `DocStrings` rows.
pub fn collect(src: &Path, split_language: &str) -> Result<StatsReport> {
    let api = cloc::parse_table(&cloc::run_cloc(src, TestScope::Exclude)?)?;
    let tests = cloc::parse_table(&cloc::run_cloc(src, TestScope::Only)?)?;
    Ok(records::split_language(&api, &tests, split_language))
}
