//! Project layout configuration.
//!
//! The original assembly scripts kept their paths as module-level constants;
//! here they live in one explicit [`Layout`] value handed to each operation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Filesystem layout of a manuscript project.
///
/// All paths are relative to the project root unless the layout was built
/// with [`Layout::rooted_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Directory directive keys are resolved against
    pub source_root: PathBuf,
    /// Master document
    pub master: PathBuf,
    /// Directories scanned for fragment files
    pub fragment_dirs: Vec<PathBuf>,
    /// Fragment file extension (without the dot)
    pub fragment_ext: String,
    /// Merged output document
    pub output: PathBuf,
    /// Citation metadata file
    pub citation: PathBuf,
    /// Fragment the author block is written to
    pub authors_fragment: PathBuf,
    /// Root directory for downloaded datasets
    pub data_dir: PathBuf,
    /// Directory for generated tables
    pub tables_dir: PathBuf,
    /// Directory for generated figures
    pub figures_dir: PathBuf,
    /// Settings file passed to the reformatter
    pub indent_settings: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            source_root: "src".into(),
            master: "src/ms.tex".into(),
            fragment_dirs: vec!["src/text".into()],
            fragment_ext: "tex".into(),
            output: "src/ms-review.tex".into(),
            citation: "CITATION.cff".into(),
            authors_fragment: "src/text/0-authors.tex".into(),
            data_dir: "src/data".into(),
            tables_dir: "src/tables/generated".into(),
            figures_dir: "src/figures".into(),
            indent_settings: ".latexindent.yaml".into(),
        }
    }
}

impl Layout {
    /// Create the conventional layout relative to the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the conventional layout with every path joined under `root`.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let base = Self::default();
        Self {
            source_root: root.join(&base.source_root),
            master: root.join(&base.master),
            fragment_dirs: base.fragment_dirs.iter().map(|d| root.join(d)).collect(),
            fragment_ext: base.fragment_ext,
            output: root.join(&base.output),
            citation: root.join(&base.citation),
            authors_fragment: root.join(&base.authors_fragment),
            data_dir: root.join(&base.data_dir),
            tables_dir: root.join(&base.tables_dir),
            figures_dir: root.join(&base.figures_dir),
            indent_settings: root.join(&base.indent_settings),
        }
    }

    /// Set the master document.
    pub fn master(mut self, path: impl Into<PathBuf>) -> Self {
        self.master = path.into();
        self
    }

    /// Set the merged output document.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Add a fragment directory to scan.
    pub fn fragment_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.fragment_dirs.push(path.into());
        self
    }

    /// Set the citation metadata file.
    pub fn citation(mut self, path: impl Into<PathBuf>) -> Self {
        self.citation = path.into();
        self
    }

    /// Set the downloaded-datasets directory.
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.master, PathBuf::from("src/ms.tex"));
        assert_eq!(layout.output, PathBuf::from("src/ms-review.tex"));
        assert_eq!(layout.fragment_dirs, vec![PathBuf::from("src/text")]);
        assert_eq!(layout.fragment_ext, "tex");
    }

    #[test]
    fn test_rooted_at() {
        let layout = Layout::rooted_at("/project");
        assert_eq!(layout.master, PathBuf::from("/project/src/ms.tex"));
        assert_eq!(layout.citation, PathBuf::from("/project/CITATION.cff"));
        assert_eq!(layout.fragment_dirs, vec![PathBuf::from("/project/src/text")]);
    }

    #[test]
    fn test_builder_setters() {
        let layout = Layout::new()
            .master("paper/main.tex")
            .output("paper/flat.tex")
            .fragment_dir("paper/sections");

        assert_eq!(layout.master, PathBuf::from("paper/main.tex"));
        assert_eq!(layout.output, PathBuf::from("paper/flat.tex"));
        assert_eq!(layout.fragment_dirs.len(), 2);
    }
}
