//! Pruning of output directories that ended up empty.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Removes every empty directory below `output_root` in one post-order pass.
///
/// Children are visited before their parent, so a parent emptied by the
/// removal of its last child is removed in the same pass. The root itself is
/// kept even when empty. Returns the removed directories in removal order.
pub fn remove_empty_dirs(output_root: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    let entries = WalkDir::new(output_root)
        .min_depth(1)
        .contents_first(true)
        .sort_by_file_name();

    for entry in entries {
        let entry = entry.map_err(|source| Error::Walk {
            root: output_root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if is_empty_dir(path)? {
            fs::remove_dir(path).map_err(|e| Error::io("removing", path, e))?;
            tracing::debug!(dir = %path.display(), "removed empty directory");
            removed.push(path.to_path_buf());
        }
    }

    Ok(removed)
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| Error::io("reading", path, e))?;
    Ok(entries.next().is_none())
}
