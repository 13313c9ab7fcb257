//! Manuscript flattening.
//!
//! A master document references its prose through `\input{<key>}` directives,
//! where `<key>` is the fragment's path relative to the source root, without
//! extension. This module discovers the fragment files, substitutes each
//! directive with the fragment's verbatim content, and writes the flattened
//! document.
//!
//! Substitution is a single pass of exact text replacement: fragments are not
//! re-scanned for directives of their own, and the result does not depend on
//! discovery order.

use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::config::Layout;
use crate::error::MspressError;
use crate::fsutil;
use crate::Result;

/// Inclusion directive: `\input{<key>}`.
static DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\input\{([^{}]+)\}").unwrap());

/// A fragment file addressed by its directive key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Source-root-relative path without extension (e.g. `text/0-authors`)
    pub key: String,
    /// Path of the fragment file on disk
    pub path: PathBuf,
}

/// Result of merging fragments into a master document.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// The merged document text
    pub text: String,
    /// Keys of fragments that were substituted
    pub substituted: Vec<String>,
    /// Fragment-directory directives still present after substitution
    pub unresolved: Vec<String>,
}

/// Render the directive string for a fragment key.
pub fn directive(key: &str) -> String {
    format!("\\input{{{key}}}")
}

/// Discover fragment files under the layout's fragment directories.
///
/// Keys are derived from the path relative to the source root, without the
/// fragment extension, using `/` as separator. Results are sorted by key and
/// deduplicated; a directory that does not exist yields no fragments.
pub fn discover_fragments(layout: &Layout) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::new();

    for dir in &layout.fragment_dirs {
        if !dir.exists() {
            log::debug!("fragment directory {} does not exist", dir.display());
            continue;
        }

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path
                .extension()
                .is_none_or(|ext| ext != layout.fragment_ext.as_str())
            {
                continue;
            }

            let rel = path.strip_prefix(&layout.source_root).unwrap_or(path);
            let key = rel.with_extension("").to_string_lossy().replace('\\', "/");
            fragments.push(Fragment {
                key,
                path: path.to_path_buf(),
            });
        }
    }

    // Sort for deterministic output
    fragments.sort_by(|a, b| a.key.cmp(&b.key));
    fragments.dedup_by(|a, b| a.key == b.key);

    Ok(fragments)
}

/// Substitute every matched directive in `text` with its fragment's content.
///
/// Fragments whose directive does not occur in the text are skipped without
/// being read. The returned outcome has an empty `unresolved` list; use
/// [`unresolved_directives`] to check the result.
pub fn merge_fragments(text: &str, fragments: &[Fragment]) -> Result<MergeOutcome> {
    let mut merged = text.to_string();
    let mut substituted = Vec::new();

    for fragment in fragments {
        let needle = directive(&fragment.key);
        if !merged.contains(&needle) {
            continue;
        }

        let content = fs::read_to_string(&fragment.path).map_err(|e| MspressError::FileRead {
            path: fragment.path.clone(),
            source: e,
        })?;
        merged = merged.replace(&needle, &content);
        substituted.push(fragment.key.clone());
    }

    Ok(MergeOutcome {
        text: merged,
        substituted,
        unresolved: Vec::new(),
    })
}

/// List directive keys in `text` that address one of the given key prefixes.
///
/// Directives pointing outside the fragment directories (document classes,
/// generated tables) are not reported.
pub fn unresolved_directives(text: &str, prefixes: &[String]) -> Vec<String> {
    let mut keys = Vec::new();
    for cap in DIRECTIVE.captures_iter(text) {
        let key = &cap[1];
        if prefixes.iter().any(|p| key.starts_with(p.as_str())) && !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Key prefixes covered by the layout's fragment directories.
fn fragment_prefixes(layout: &Layout) -> Vec<String> {
    layout
        .fragment_dirs
        .iter()
        .map(|dir| {
            let rel = dir.strip_prefix(&layout.source_root).unwrap_or(dir);
            let mut prefix = rel.to_string_lossy().replace('\\', "/");
            if !prefix.is_empty() && !prefix.ends_with('/') {
                prefix.push('/');
            }
            prefix
        })
        .collect()
}

/// Flatten the master document and write the merged output.
///
/// With `allow_unresolved` false (the default contract), any fragment
/// directive still present after substitution is an error and nothing is
/// written. With it true, unmatched directives are left verbatim and listed
/// in the outcome.
pub fn assemble(layout: &Layout, allow_unresolved: bool) -> Result<MergeOutcome> {
    if !layout.master.exists() {
        return Err(MspressError::MasterNotFound(layout.master.clone()));
    }
    let text = fs::read_to_string(&layout.master).map_err(|e| MspressError::FileRead {
        path: layout.master.clone(),
        source: e,
    })?;

    let fragments = discover_fragments(layout)?;
    let mut outcome = merge_fragments(&text, &fragments)?;
    outcome.unresolved = unresolved_directives(&outcome.text, &fragment_prefixes(layout));

    if !outcome.unresolved.is_empty() && !allow_unresolved {
        return Err(MspressError::UnresolvedDirectives(outcome.unresolved));
    }

    fsutil::write_text(&layout.output, &outcome.text)?;
    log::info!(
        "merged {} fragments into {}",
        outcome.substituted.len(),
        layout.output.display()
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn sample_project(root: &Path) -> Layout {
        write_file(
            &root.join("src/ms.tex"),
            "A\n\\input{text/0-authors}\nB",
        );
        write_file(&root.join("src/text/0-authors.tex"), "Authors: X, Y");
        Layout::rooted_at(root)
    }

    #[test]
    fn test_directive_format() {
        assert_eq!(directive("text/0-authors"), "\\input{text/0-authors}");
    }

    #[test]
    fn test_discover_fragments() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/text/0-intro.tex"), "x");
        write_file(
            &temp.path().join("src/text/2-package-subsections/maps.tex"),
            "y",
        );
        write_file(&temp.path().join("src/text/notes.md"), "not a fragment");

        let layout = Layout::rooted_at(temp.path());
        let fragments = discover_fragments(&layout).unwrap();

        let keys: Vec<&str> = fragments.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["text/0-intro", "text/2-package-subsections/maps"]);
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let temp = tempdir().unwrap();
        let layout = Layout::rooted_at(temp.path());

        let fragments = discover_fragments(&layout).unwrap();

        assert!(fragments.is_empty());
    }

    #[test]
    fn test_assemble_substitutes_fragment() {
        let temp = tempdir().unwrap();
        let layout = sample_project(temp.path());

        let outcome = assemble(&layout, false).unwrap();

        assert_eq!(outcome.text, "A\nAuthors: X, Y\nB");
        assert_eq!(outcome.substituted, vec!["text/0-authors".to_string()]);
        assert_eq!(
            fs::read_to_string(&layout.output).unwrap(),
            "A\nAuthors: X, Y\nB"
        );
    }

    #[test]
    fn test_assemble_replaces_every_occurrence() {
        let temp = tempdir().unwrap();
        write_file(
            &temp.path().join("src/ms.tex"),
            "\\input{text/x}\nmiddle\n\\input{text/x}",
        );
        write_file(&temp.path().join("src/text/x.tex"), "T");

        let layout = Layout::rooted_at(temp.path());
        let outcome = assemble(&layout, false).unwrap();

        assert_eq!(outcome.text, "T\nmiddle\nT");
    }

    #[test]
    fn test_assemble_idempotent_without_directives() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/ms.tex"), "no directives here");
        write_file(&temp.path().join("src/text/unused.tex"), "unused");

        let layout = Layout::rooted_at(temp.path());
        let outcome = assemble(&layout, false).unwrap();

        assert_eq!(outcome.text, "no directives here");
        assert!(outcome.substituted.is_empty());
    }

    #[test]
    fn test_assemble_strict_on_unresolved() {
        let temp = tempdir().unwrap();
        write_file(
            &temp.path().join("src/ms.tex"),
            "\\input{text/missing}\n",
        );
        fs::create_dir_all(temp.path().join("src/text")).unwrap();

        let layout = Layout::rooted_at(temp.path());
        let result = assemble(&layout, false);

        match result {
            Err(MspressError::UnresolvedDirectives(keys)) => {
                assert_eq!(keys, vec!["text/missing".to_string()]);
            }
            other => panic!("expected UnresolvedDirectives, got {other:?}"),
        }
        assert!(!layout.output.exists());
    }

    #[test]
    fn test_assemble_allow_unresolved() {
        let temp = tempdir().unwrap();
        write_file(
            &temp.path().join("src/ms.tex"),
            "\\input{text/missing}\n",
        );
        fs::create_dir_all(temp.path().join("src/text")).unwrap();

        let layout = Layout::rooted_at(temp.path());
        let outcome = assemble(&layout, true).unwrap();

        assert_eq!(outcome.text, "\\input{text/missing}\n");
        assert_eq!(outcome.unresolved, vec!["text/missing".to_string()]);
    }

    #[test]
    fn test_non_fragment_directives_untouched() {
        let temp = tempdir().unwrap();
        write_file(
            &temp.path().join("src/ms.tex"),
            "\\input{aa}\n\\input{tables/generated/codestats}\n\\input{text/0-authors}\n",
        );
        write_file(&temp.path().join("src/text/0-authors.tex"), "Authors");

        let layout = Layout::rooted_at(temp.path());
        let outcome = assemble(&layout, false).unwrap();

        assert!(outcome.text.contains("\\input{aa}"));
        assert!(outcome.text.contains("\\input{tables/generated/codestats}"));
        assert!(outcome.text.contains("Authors"));
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn test_assemble_missing_master() {
        let temp = tempdir().unwrap();
        let layout = Layout::rooted_at(temp.path());

        let result = assemble(&layout, false);

        assert!(matches!(result, Err(MspressError::MasterNotFound(_))));
    }

    #[test]
    fn test_unresolved_directives_prefix_filter() {
        let prefixes = vec!["text/".to_string()];
        let text = "\\input{text/a}\n\\input{style/aa}\n\\input{text/a}";

        let keys = unresolved_directives(text, &prefixes);

        assert_eq!(keys, vec!["text/a".to_string()]);
    }
}
