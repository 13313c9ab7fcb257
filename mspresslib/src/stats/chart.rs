//! Pie chart of code-line shares.

use std::path::Path;

use plotters::prelude::*;

use crate::error::MspressError;
use crate::fsutil;
use crate::stats::records::{chart_slices, StatsReport};
use crate::Result;

/// Categorical colors, cycled over the slices.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Chart dimensions and grouping.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Categories kept before grouping the rest into `Others`
    pub keep: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            keep: 5,
        }
    }
}

/// Draw the report's code-line shares as a pie chart (SVG).
///
/// Slice labels carry the category name and its integer-rounded share of
/// total code lines. A report with no code lines produces an empty chart
/// rather than an error.
pub fn render_pie(report: &StatsReport, path: &Path, config: &ChartConfig) -> Result<()> {
    let slices = chart_slices(&report.rows, config.keep);

    fsutil::create_parent(path)?;
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| MspressError::Chart(e.to_string()))?;

    let total: u64 = slices.iter().map(|s| s.code).sum();
    if total > 0 {
        let sizes: Vec<f64> = slices.iter().map(|s| s.code as f64).collect();
        let labels: Vec<String> = slices
            .iter()
            .map(|s| format!("{} {}", s.label, s.percent))
            .collect();
        let colors: Vec<RGBColor> = (0..slices.len()).map(|i| PALETTE[i % PALETTE.len()]).collect();

        let center = (config.width as i32 / 2, config.height as i32 / 2);
        let radius = f64::from(config.width.min(config.height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        root.draw(&pie)
            .map_err(|e| MspressError::Chart(e.to_string()))?;
    } else {
        log::warn!("no code counts to chart");
    }

    root.present()
        .map_err(|e| MspressError::Chart(e.to_string()))?;
    log::info!("pie chart written to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::records::LanguageCount;
    use std::fs;
    use tempfile::tempdir;

    fn report_with_code(code: &[(&str, u64)]) -> StatsReport {
        StatsReport {
            rows: code
                .iter()
                .map(|(language, lines)| LanguageCount {
                    language: language.to_string(),
                    files: 1,
                    blank: 0,
                    comment: 0,
                    code: *lines,
                })
                .collect(),
            ..StatsReport::default()
        }
    }

    #[test]
    fn test_render_pie_writes_svg() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("figures/codestats.svg");
        let report = report_with_code(&[("Python API", 300), ("Shell", 100)]);

        render_pie(&report, &path, &ChartConfig::default()).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("75%"));
        assert!(svg.contains("25%"));
    }

    #[test]
    fn test_render_pie_empty_report() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("codestats.svg");

        render_pie(&StatsReport::default(), &path, &ChartConfig::default()).unwrap();

        assert!(path.exists());
    }
}
