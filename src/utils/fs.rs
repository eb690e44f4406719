//! Filesystem checks

use std::path::Path;

/// `true` when `path` names an existing file or directory.
pub fn is_file_exist<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().metadata().is_ok()
}
