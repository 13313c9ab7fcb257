//! Invocation and parsing of the external line-counting tool.
//!
//! The tool's human-readable table is the wire contract: a `Language ...`
//! header, dashed separators, one row per language and a `SUM:` totals row.
//! A row that stops matching that shape is a fatal parse error.

use std::path::Path;
use std::process::Command;

use crate::error::MspressError;
use crate::stats::records::{LanguageCount, StatsReport};
use crate::Result;

/// Which side of the test-directory split to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestScope {
    /// Skip directories whose name matches `test`
    Exclude,
    /// Count only directories whose name matches `test`
    Only,
}

impl TestScope {
    /// The tool flag selecting this scope.
    pub fn flag(self) -> &'static str {
        match self {
            TestScope::Exclude => "--not-match-d=test",
            TestScope::Only => "--match-d=test",
        }
    }
}

/// Run `cloc` over `src` and return its stdout.
pub fn run_cloc(src: &Path, scope: TestScope) -> Result<String> {
    let output = Command::new("cloc")
        .arg(scope.flag())
        .arg(src)
        .output()
        .map_err(|e| MspressError::ToolInvocation {
            tool: "cloc".to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(MspressError::ToolInvocation {
            tool: "cloc".to_string(),
            message: format!("exited with {}", output.status),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse the tool's table into structured rows.
///
/// Text before the `Language` header (file counts, version banner) is
/// skipped. An output with no table at all — the tool matched zero files —
/// yields an empty report with a zeroed totals row.
pub fn parse_table(output: &str) -> Result<StatsReport> {
    let mut report = StatsReport::default();
    let mut in_table = false;

    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !in_table {
            if trimmed.starts_with("Language") {
                in_table = true;
            }
            continue;
        }
        if trimmed.starts_with('-') {
            continue;
        }

        let row = parse_row(trimmed)?;
        if row.language == "SUM:" {
            report.total = row;
        } else {
            report.rows.push(row);
        }
    }

    Ok(report)
}

/// Parse one table row: a language name followed by four counts.
///
/// Language names may contain spaces, so the four rightmost tokens are the
/// counts and everything before them is the name.
fn parse_row(line: &str) -> Result<LanguageCount> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 {
        return Err(MspressError::MalformedRow(line.to_string()));
    }

    let numbers: Vec<u64> = tokens[tokens.len() - 4..]
        .iter()
        .map(|t| t.parse())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| MspressError::MalformedRow(line.to_string()))?;

    Ok(LanguageCount {
        language: tokens[..tokens.len() - 4].join(" "),
        files: numbers[0],
        blank: numbers[1],
        comment: numbers[2],
        code: numbers[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
     250 text files.
     239 unique files.
      59 files ignored.

github.com/AlDanial/cloc v 1.90  T=0.61 s (327.9 files/s, 132004.7 lines/s)
-------------------------------------------------------------------------------
Language                     files          blank        comment           code
-------------------------------------------------------------------------------
Python                         180           9023          12045          33340
Jupyter Notebook                 8              0           2146           1426
Bourne Shell                     6             51             45            220
-------------------------------------------------------------------------------
SUM:                           194           9074          14236          34986
-------------------------------------------------------------------------------
";

    #[test]
    fn test_parse_full_table() {
        let report = parse_table(SAMPLE).unwrap();

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].language, "Python");
        assert_eq!(report.rows[0].files, 180);
        assert_eq!(report.rows[0].code, 33340);
        assert_eq!(report.rows[1].language, "Jupyter Notebook");
        assert_eq!(report.rows[2].language, "Bourne Shell");
        assert_eq!(report.total.language, "SUM:");
        assert_eq!(report.total.code, 34986);
    }

    #[test]
    fn test_parse_synthetic_two_rows() {
        let output = "\
Language files blank comment code
Python 10 5 3 100
SUM: 10 5 3 100
";
        let report = parse_table(output).unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(
            report.rows[0],
            LanguageCount {
                language: "Python".to_string(),
                files: 10,
                blank: 5,
                comment: 3,
                code: 100,
            }
        );
        assert_eq!(report.total.files, 10);
        assert_eq!(report.total.blank, 5);
        assert_eq!(report.total.comment, 3);
        assert_eq!(report.total.code, 100);
    }

    #[test]
    fn test_parse_empty_output() {
        let report = parse_table("      0 text files.\n      0 unique files.\n").unwrap();

        assert!(report.rows.is_empty());
        assert_eq!(report.total, LanguageCount::new("SUM:"));
    }

    #[test]
    fn test_parse_malformed_row() {
        let output = "\
Language files blank comment code
Python ten 5 3 100
";
        let result = parse_table(output);

        assert!(matches!(result, Err(MspressError::MalformedRow(_))));
    }

    #[test]
    fn test_parse_short_row() {
        let output = "\
Language files blank comment code
Python 10
";
        assert!(matches!(
            parse_table(output),
            Err(MspressError::MalformedRow(_))
        ));
    }

    #[test]
    fn test_scope_flags() {
        assert_eq!(TestScope::Exclude.flag(), "--not-match-d=test");
        assert_eq!(TestScope::Only.flag(), "--match-d=test");
    }
}
