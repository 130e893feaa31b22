//! External tool detection.
//!
//! The finalizer shells out to `codesign` and `tar`. Both are resolved on
//! `PATH` before use so a missing tool is reported by name instead of as a
//! bare spawn failure.

use crate::bundler::error::{Error, Result};
use std::path::PathBuf;

/// Code signing tool.
pub const CODESIGN: &str = "codesign";

/// Archiving tool.
pub const TAR: &str = "tar";

/// Resolves `tool` on `PATH`.
pub fn require(tool: &'static str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            Err(Error::ToolNotFound { tool })
        }
    }
}
