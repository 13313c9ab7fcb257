//! Small filesystem helpers shared across modules.

use std::fs;
use std::path::Path;

use crate::error::MspressError;
use crate::Result;

/// Create the parent directory of `path` if it has one.
pub(crate) fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(MspressError::Io)?;
        }
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories as needed.
pub(crate) fn write_text(path: &Path, content: &str) -> Result<()> {
    create_parent(path)?;
    fs::write(path, content).map_err(|e| MspressError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
