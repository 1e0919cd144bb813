//! Input tree traversal.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::paths;

const PDF_EXTENSION: &str = "pdf";

/// Collects every `.pdf` file under `input_root` and recreates the directory
/// skeleton under `output_root`.
///
/// Entries are visited in file-name order, so the returned list is stable
/// across platforms. Directories are mirrored whether or not they hold any
/// PDF; [`crate::cleanup`] prunes the empty ones afterwards. If the output
/// root sits inside the input root it is not descended into.
pub fn walk(input_root: &Path, output_root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let entries = WalkDir::new(input_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.path() != output_root);

    for entry in entries {
        let entry = entry.map_err(|source| Error::Walk {
            root: input_root.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            let mirrored = paths::reroot(input_root, output_root, path)?;
            if !mirrored.exists() {
                fs::create_dir(&mirrored).map_err(|e| Error::io("creating", &mirrored, e))?;
                tracing::debug!(dir = %mirrored.display(), "mirrored directory");
            }
        } else if is_pdf(path) && is_file_or_file_link(&entry) {
            files.push(path.to_path_buf());
        }
    }

    tracing::info!(count = files.len(), root = %input_root.display(), "collected PDF files");
    Ok(files)
}

/// Symlinks to files count; symlinked directories are not descended into.
fn is_file_or_file_link(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PDF_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn roots(temp: &TempDir) -> (PathBuf, PathBuf) {
        let input = temp.path().join("PDF");
        let output = temp.path().join("out");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();
        (
            fs::canonicalize(input).unwrap(),
            fs::canonicalize(output).unwrap(),
        )
    }

    #[test]
    fn collects_pdfs_in_name_order() {
        let temp = TempDir::new().unwrap();
        let (input, output) = roots(&temp);
        fs::create_dir_all(input.join("sub")).unwrap();
        fs::write(input.join("b.pdf"), b"b").unwrap();
        fs::write(input.join("a.pdf"), b"a").unwrap();
        fs::write(input.join("sub/c.pdf"), b"c").unwrap();
        fs::write(input.join("notes.txt"), b"n").unwrap();

        let files = walk(&input, &output).unwrap();
        assert_eq!(
            files,
            vec![input.join("a.pdf"), input.join("b.pdf"), input.join("sub/c.pdf")]
        );
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let (input, output) = roots(&temp);
        fs::write(input.join("upper.PDF"), b"x").unwrap();
        fs::write(input.join("lower.pdf"), b"x").unwrap();

        let files = walk(&input, &output).unwrap();
        assert_eq!(files, vec![input.join("lower.pdf")]);
    }

    #[test]
    fn directories_named_like_pdfs_are_not_files() {
        let temp = TempDir::new().unwrap();
        let (input, output) = roots(&temp);
        fs::create_dir_all(input.join("folder.pdf")).unwrap();

        let files = walk(&input, &output).unwrap();
        assert!(files.is_empty());
        assert!(output.join("folder.pdf").is_dir());
    }

    #[test]
    fn mirrors_every_directory() {
        let temp = TempDir::new().unwrap();
        let (input, output) = roots(&temp);
        fs::create_dir_all(input.join("x/y/z")).unwrap();
        fs::create_dir_all(input.join("empty")).unwrap();

        walk(&input, &output).unwrap();
        assert!(output.join("x/y/z").is_dir());
        assert!(output.join("empty").is_dir());
    }

    #[test]
    fn walking_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let (input, output) = roots(&temp);
        fs::create_dir_all(input.join("sub")).unwrap();

        walk(&input, &output).unwrap();
        walk(&input, &output).unwrap();
        assert!(output.join("sub").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_pdfs_are_collected() {
        let temp = TempDir::new().unwrap();
        let (input, output) = roots(&temp);
        let target = temp.path().join("elsewhere.pdf");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, input.join("linked.pdf")).unwrap();
        fs::create_dir_all(temp.path().join("linked_dir")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("linked_dir"), input.join("dir.pdf")).unwrap();

        let files = walk(&input, &output).unwrap();
        assert_eq!(files, vec![input.join("linked.pdf")]);
    }

    #[test]
    fn skips_output_root_nested_in_input() {
        let temp = TempDir::new().unwrap();
        let input = fs::canonicalize(temp.path()).unwrap();
        let output = input.join("out");
        fs::create_dir_all(output.join("already")).unwrap();
        fs::write(output.join("already/done.pdf"), b"x").unwrap();
        fs::write(input.join("a.pdf"), b"x").unwrap();

        let files = walk(&input, &output).unwrap();
        assert_eq!(files, vec![input.join("a.pdf")]);
        assert!(!output.join("out").exists());
    }
}
