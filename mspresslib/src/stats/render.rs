//! Rendering of count reports as LaTeX and delimited text.
//!
//! The LaTeX table is written for direct `\input` into the manuscript; the
//! data file is the same rows in `", "`-delimited form and is what the chart
//! step consumes.

use std::fs;
use std::path::Path;

use crate::error::MspressError;
use crate::fsutil;
use crate::stats::records::{display_name, LanguageCount, StatsReport};
use crate::Result;

const HEADER: [&str; 5] = ["Language", "files", "blank", "comment", "code"];

/// One LaTeX table row. Spaces in category names become `~` so each cell
/// stays a single token.
fn latex_row(row: &LanguageCount) -> String {
    format!(
        "{}\t& {}\t& {}\t& {}\t& {} \\\\",
        display_name(&row.language).replace(' ', "~"),
        row.files,
        row.blank,
        row.comment,
        row.code
    )
}

/// Render the report as a LaTeX `tabular`.
pub fn latex_table(report: &StatsReport) -> String {
    let labels = format!("{} \\\\", HEADER.join("\t& "));
    let mut cells = String::new();
    for row in &report.rows {
        cells.push_str(&latex_row(row));
        cells.push('\n');
    }
    let summary = latex_row(&report.total);

    format!(
        "\\begin{{tabular}}{{ccccccc}}\n\\hline\n{labels}\n\\hline\n{cells}\\hline\n{summary}\n\\end{{tabular}}\n"
    )
}

fn csv_row(row: &LanguageCount) -> String {
    format!(
        "{}, {}, {}, {}, {}",
        display_name(&row.language),
        row.files,
        row.blank,
        row.comment,
        row.code
    )
}

/// Render the report as a `", "`-delimited data file.
pub fn data_file(report: &StatsReport) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(", "));
    out.push('\n');
    for row in &report.rows {
        out.push_str(&csv_row(row));
        out.push('\n');
    }
    out.push_str(&csv_row(&report.total));
    out
}

/// Parse a data file written by [`data_file`] back into a report.
///
/// The last row is the totals row; integer counts round-trip exactly.
pub fn parse_data_file(text: &str) -> Result<StatsReport> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    match lines.next() {
        Some(header) if header.starts_with("Language") => {}
        Some(other) => return Err(MspressError::MalformedRow(other.to_string())),
        None => return Ok(StatsReport::default()),
    }

    let mut rows: Vec<LanguageCount> = lines.map(parse_csv_row).collect::<Result<_>>()?;
    let total = rows.pop().unwrap_or_else(|| LanguageCount::new("Total"));

    Ok(StatsReport { rows, total })
}

fn parse_csv_row(line: &str) -> Result<LanguageCount> {
    let fields: Vec<&str> = line.split(", ").collect();
    if fields.len() != 5 {
        return Err(MspressError::MalformedRow(line.to_string()));
    }
    let parse = |field: &str| {
        field
            .trim()
            .parse::<u64>()
            .map_err(|_| MspressError::MalformedRow(line.to_string()))
    };

    Ok(LanguageCount {
        language: fields[0].to_string(),
        files: parse(fields[1])?,
        blank: parse(fields[2])?,
        comment: parse(fields[3])?,
        code: parse(fields[4])?,
    })
}

/// Write the LaTeX table, creating parent directories as needed.
pub fn write_latex_table(report: &StatsReport, path: &Path) -> Result<()> {
    fsutil::write_text(path, &latex_table(report))?;
    log::info!("LaTeX table written to {}", path.display());
    Ok(())
}

/// Write the data file, creating parent directories as needed.
pub fn write_data_file(report: &StatsReport, path: &Path) -> Result<()> {
    fsutil::write_text(path, &data_file(report))?;
    log::info!("data file written to {}", path.display());
    Ok(())
}

/// Read a data file from disk.
pub fn read_data_file(path: &Path) -> Result<StatsReport> {
    let text = fs::read_to_string(path).map_err(|e| MspressError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_data_file(&text)
}
