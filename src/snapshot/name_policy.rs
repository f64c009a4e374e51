//! How capture names are turned into file names

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, is_separator};

use crate::browser::{SnapshotError, SnapshotResult};

/// Rules applied to a capture name before it becomes a file name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Use the name as given. `a/b` writes into a subdirectory, `../x` escapes
    /// the output directory. A leading root (`/tmp/x`, `C:\x`) is dropped, so
    /// `/tmp/x` lands at `<output_dir>/tmp/x`.
    #[default]
    Verbatim,
    /// Reject names that could leave the output directory or nest into it.
    Strict,
}

impl NamePolicy {
    pub fn check(self, name: &str) -> SnapshotResult<()> {
        if name.is_empty() {
            return Err(SnapshotError::invalid_arguments("Capture name cannot be empty"));
        }
        if relative_name(name).is_empty() {
            return Err(SnapshotError::invalid_arguments(format!(
                "Capture name '{}' has no file name after its root",
                name.escape_debug()
            )));
        }

        if self == NamePolicy::Verbatim {
            return Ok(());
        }

        if name.contains(['/', '\\', '\0']) {
            return Err(SnapshotError::invalid_arguments(format!(
                "Capture name '{}' contains a path separator or NUL byte",
                name.escape_debug()
            )));
        }
        if name == "." || name == ".." {
            return Err(SnapshotError::invalid_arguments(format!(
                "Capture name '{}' is a directory reference",
                name
            )));
        }

        Ok(())
    }
}

/// `name` with any leading root or drive prefix removed.
///
/// Joining the result onto a directory always stays under that directory
/// (modulo `..`), unlike `Path::join` with an absolute name.
pub(crate) fn relative_name(name: &str) -> &str {
    let mut rest = name;
    loop {
        let trimmed = rest.trim_start_matches(is_separator);
        match Path::new(trimmed).components().next() {
            Some(Component::Prefix(prefix)) => {
                rest = &trimmed[prefix.as_os_str().len()..];
            }
            _ => return trimmed,
        }
    }
}
