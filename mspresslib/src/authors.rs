//! Author block generation from citation metadata.
//!
//! The author list of the manuscript is maintained once, in the package's
//! `CITATION.cff` file. This module turns it into the LaTeX
//! `\author`/`\institute` block, cross-referencing each author to their
//! affiliation with `inst:N` labels.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::Layout;
use crate::error::MspressError;
use crate::fsutil;
use crate::Result;

/// Author entry of a `CITATION.cff` file.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    #[serde(rename = "given-names")]
    pub given_names: String,
    #[serde(rename = "name-particle", default)]
    pub name_particle: Option<String>,
    #[serde(rename = "family-names")]
    pub family_names: String,
    #[serde(default)]
    pub affiliation: Option<String>,
}

impl Author {
    /// Full display name, with the name particle when present.
    pub fn full_name(&self) -> String {
        match &self.name_particle {
            Some(particle) => format!("{} {} {}", self.given_names, particle, self.family_names),
            None => format!("{} {}", self.given_names, self.family_names),
        }
    }
}

/// The subset of `CITATION.cff` the author block needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Citation {
    pub authors: Vec<Author>,
}

/// Load citation metadata from a `CITATION.cff` file.
pub fn load_citation(path: &Path) -> Result<Citation> {
    let text = fs::read_to_string(path).map_err(|e| MspressError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_yaml::from_str(&text).map_err(|e| MspressError::CitationParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Short author list for the `\authorrunning` header.
pub fn running_header(citation: &Citation) -> String {
    let families: Vec<&str> = citation
        .authors
        .iter()
        .map(|a| a.family_names.as_str())
        .collect();
    if families.len() > 3 {
        format!("{} et al.", families[..3].join(", "))
    } else {
        families.join(", ")
    }
}

/// Escape characters LaTeX treats specially in affiliation strings.
fn escape(text: &str) -> String {
    text.replace('&', "\\&")
}

/// Render the `\authorrunning`/`\author`/`\institute` block.
///
/// Authors and affiliations are paired through `inst:N` labels; a missing
/// affiliation renders as `unknown`.
pub fn render_author_block(citation: &Citation, running: &str) -> String {
    let mut out = format!("\\authorrunning{{{running}}}\n\n\\author{{\n");

    for (idx, author) in citation.authors.iter().enumerate() {
        out.push_str(&format!(
            "\t{} \\inst{{\\ref{{inst:{idx}}}}} \\and\n",
            author.full_name()
        ));
    }

    out.push_str("}\n\n\\institute{\n");

    for (idx, author) in citation.authors.iter().enumerate() {
        let affiliation = author.affiliation.as_deref().unwrap_or("unknown");
        out.push_str(&format!(
            "\t{} \\label{{inst:{idx}}} \\and\n",
            escape(affiliation)
        ));
    }

    out.push_str("}\n");
    out
}

/// Generate the author fragment from the layout's citation file.
///
/// When `running` is not given, the header is derived from the first
/// family names. Returns the path of the written fragment.
pub fn write_author_fragment(layout: &Layout, running: Option<&str>) -> Result<std::path::PathBuf> {
    let citation = load_citation(&layout.citation)?;
    let running = match running {
        Some(r) => r.to_string(),
        None => running_header(&citation),
    };
    let block = render_author_block(&citation, &running);

    fsutil::write_text(&layout.authors_fragment, &block)?;
    log::info!(
        "author block written to {}",
        layout.authors_fragment.display()
    );

    Ok(layout.authors_fragment.clone())
}
