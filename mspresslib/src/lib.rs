//! # mspresslib
//!
//! A library for assembling a LaTeX manuscript describing a software package,
//! from the text fragments, generated tables and figures of a paper project.
//!
//! ## Overview
//!
//! A manuscript project keeps its prose in small reusable fragments under a
//! text directory, referenced from a master document with `\input{...}`
//! directives. This library flattens the master into a single reviewable
//! document, and produces the generated artifacts the manuscript embeds:
//!
//! - **Assembly**: merge every fragment into the master document in one pass
//! - **Code statistics**: run an external line-counting tool over a source
//!   tree and render a LaTeX table, a delimited data file and a pie chart
//! - **Author block**: turn `CITATION.cff` metadata into the
//!   `\author`/`\institute` block
//! - **Datasets**: fetch the reference datasets the figures are built from
//! - **Reformatting**: run `latexindent` over the text fragments in place
//!
//! All paths come from an explicit [`Layout`] value; nothing reads global
//! state.
//!
//! ## Example
//!
//! ```rust
//! use mspresslib::{assemble, Layout};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Set up a minimal manuscript project
//! let dir = tempdir().unwrap();
//! let root = dir.path();
//! fs::create_dir_all(root.join("src/text")).unwrap();
//! fs::write(root.join("src/ms.tex"), "A\n\\input{text/0-authors}\nB").unwrap();
//! fs::write(root.join("src/text/0-authors.tex"), "Authors: X, Y").unwrap();
//!
//! // Flatten the master document
//! let layout = Layout::rooted_at(root);
//! let outcome = assemble(&layout, false).unwrap();
//! assert_eq!(outcome.text, "A\nAuthors: X, Y\nB");
//! assert_eq!(outcome.substituted, vec!["text/0-authors".to_string()]);
//! ```

pub mod assemble;
pub mod authors;
pub mod config;
pub mod download;
pub mod error;
pub mod reformat;
pub mod stats;

mod fsutil;

pub use assemble::{
    assemble, discover_fragments, merge_fragments, unresolved_directives, Fragment, MergeOutcome,
};
pub use authors::{
    load_citation, render_author_block, running_header, write_author_fragment, Author, Citation,
};
pub use config::Layout;
pub use download::{dataset, dataset_names, download_dataset, Dataset, FileGroup, BASE_URL};
pub use error::MspressError;
pub use reformat::{reformat_file, reformat_fragments};
pub use stats::{collect, ChartConfig, LanguageCount, Slice, StatsReport};

/// Result type for mspresslib operations
pub type Result<T> = std::result::Result<T, MspressError>;
