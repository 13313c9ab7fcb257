//! In-place reformatting of text fragments.
//!
//! Fragments are normalized with `latexindent`, driven by the project's
//! settings file, so hand-edited prose keeps a consistent layout. The tool
//! is invoked once per file, writing the result back in place.

use std::path::Path;
use std::process::Command;

use glob::glob;

use crate::config::Layout;
use crate::error::MspressError;
use crate::Result;

/// Reformat every fragment in the layout's fragment directories.
///
/// Returns the number of files reformatted.
pub fn reformat_fragments(layout: &Layout) -> Result<usize> {
    let mut count = 0;

    for dir in &layout.fragment_dirs {
        let pattern = format!("{}/*.{}", dir.display(), layout.fragment_ext);
        let entries = glob(&pattern).map_err(|e| MspressError::InvalidGlob {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;

        for entry in entries {
            let path = entry.map_err(|e| MspressError::Io(e.into_error()))?;
            reformat_file(&path, &layout.indent_settings)?;
            count += 1;
        }
    }

    Ok(count)
}

/// Reformat one file in place.
pub fn reformat_file(path: &Path, settings: &Path) -> Result<()> {
    log::info!("reformatting {}", path.display());

    let status = Command::new("latexindent")
        .arg(path)
        .arg("-s")
        .arg("-m")
        .arg("-l")
        .arg(settings)
        .arg("-o")
        .arg(path)
        .status()
        .map_err(|e| MspressError::ToolInvocation {
            tool: "latexindent".to_string(),
            message: e.to_string(),
        })?;

    if !status.success() {
        return Err(MspressError::ToolInvocation {
            tool: "latexindent".to_string(),
            message: format!("exited with {status}"),
        });
    }

    Ok(())
}
