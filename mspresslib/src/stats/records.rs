//! Data structures for line-count reports.

use serde::{Deserialize, Serialize};

/// One row of the counting tool's report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    /// Language or derived category name
    pub language: String,
    /// Number of files
    pub files: u64,
    /// Blank lines
    pub blank: u64,
    /// Comment lines
    pub comment: u64,
    /// Code lines
    pub code: u64,
}

impl LanguageCount {
    /// Create a zeroed row for a language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }
}

/// Full report: per-language rows plus the totals row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Per-language rows in the counting tool's order
    pub rows: Vec<LanguageCount>,
    /// The tool's `SUM:` row
    pub total: LanguageCount,
}

impl Default for StatsReport {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total: LanguageCount::new("SUM:"),
        }
    }
}

/// A pie chart slice with its percentage label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    /// Display name of the category
    pub label: String,
    /// Code lines in the category
    pub code: u64,
    /// Share of total code lines, rounded to the nearest integer percent
    pub percent: String,
}

/// Presentation name for a language row.
pub fn display_name(language: &str) -> String {
    match language {
        "Jupyter Notebook" => "Notebooks",
        "DOS Batch" => "Batch",
        "Bourne Shell" => "Shell",
        "SUM:" => "Total",
        other => other,
    }
    .to_string()
}

/// Replace the aggregate `language` row with derived category rows.
///
/// The row is split into `<lang> API` (counts from the exclude-tests run),
/// `<lang> Tests` (counts from the tests-only run) and `DocStrings` (code
/// column equal to the API run's comment count). Rows keep the tool's order;
/// the totals row is the exclude-tests run's. A report without the aggregate
/// row is returned unchanged.
pub fn split_language(api: &StatsReport, tests: &StatsReport, language: &str) -> StatsReport {
    let mut out = StatsReport {
        rows: Vec::new(),
        total: api.total.clone(),
    };

    for row in &api.rows {
        if row.language != language {
            out.rows.push(row.clone());
            continue;
        }

        let mut api_row = row.clone();
        api_row.language = format!("{language} API");
        out.rows.push(api_row);

        let mut test_row = tests
            .rows
            .iter()
            .find(|r| r.language == language)
            .cloned()
            .unwrap_or_else(|| LanguageCount::new(language));
        test_row.language = format!("{language} Tests");
        out.rows.push(test_row);

        out.rows.push(LanguageCount {
            language: "DocStrings".to_string(),
            files: row.files,
            blank: 0,
            comment: 0,
            code: row.comment,
        });
    }

    out
}

/// Group rows into chart slices: the `keep` largest categories by code lines,
/// with the remainder summed into `Others`.
pub fn chart_slices(rows: &[LanguageCount], keep: usize) -> Vec<Slice> {
    let mut sorted: Vec<&LanguageCount> = rows.iter().collect();
    sorted.sort_by(|a, b| b.code.cmp(&a.code));

    let total: u64 = sorted.iter().map(|r| r.code).sum();

    let mut slices = Vec::new();
    for row in sorted.iter().take(keep) {
        slices.push(Slice {
            label: display_name(&row.language),
            code: row.code,
            percent: percent_label(row.code, total),
        });
    }

    if sorted.len() > keep {
        let rest: u64 = sorted[keep..].iter().map(|r| r.code).sum();
        slices.push(Slice {
            label: "Others".to_string(),
            code: rest,
            percent: percent_label(rest, total),
        });
    }

    slices
}

/// Integer-percent label for a category's share of `total`.
fn percent_label(code: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.0}%", code as f64 / total as f64 * 100.0)
}
