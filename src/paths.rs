//! Root resolution and mirroring of input paths under the output root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Canonical absolute path of an existing input directory.
pub fn resolve_input_root(path: &Path) -> Result<PathBuf> {
    let root = fs::canonicalize(path).map_err(|e| Error::io("resolving", path, e))?;
    if !root.is_dir() {
        return Err(Error::Path(format!(
            "input root {} is not a directory",
            root.display()
        )));
    }
    Ok(root)
}

/// Creates the output directory when missing and returns its canonical path.
pub fn resolve_output_root(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::io("creating", path, e))?;
        tracing::debug!(path = %path.display(), "created output root");
    }
    let root = fs::canonicalize(path).map_err(|e| Error::io("resolving", path, e))?;
    if !root.is_dir() {
        return Err(Error::Path(format!(
            "output root {} is not a directory",
            root.display()
        )));
    }
    Ok(root)
}

/// `path` with the `root` prefix stripped.
pub fn relative_to<'a>(root: &Path, path: &'a Path) -> Result<&'a Path> {
    path.strip_prefix(root).map_err(|_| {
        Error::Path(format!(
            "{} is not under {}",
            path.display(),
            root.display()
        ))
    })
}

/// The path mirroring `path` (under `input_root`) beneath `output_root`.
pub fn reroot(input_root: &Path, output_root: &Path, path: &Path) -> Result<PathBuf> {
    Ok(output_root.join(relative_to(input_root, path)?))
}

/// Ledger key for a relative path: components joined with `/` on every platform.
pub fn display_key(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn input_root_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(matches!(
            resolve_input_root(&missing),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn input_root_rejects_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.pdf");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(resolve_input_root(&file), Err(Error::Path(_))));
    }

    #[test]
    fn output_root_is_created() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out").join("nested");
        let root = resolve_output_root(&out).unwrap();
        assert!(root.is_dir());
        assert!(root.is_absolute());
    }

    #[test]
    fn reroot_mirrors_relative_layout() {
        let input = Path::new("/data/in");
        let output = Path::new("/data/out");
        let mirrored = reroot(input, output, Path::new("/data/in/sub/b.pdf")).unwrap();
        assert_eq!(mirrored, Path::new("/data/out/sub/b.pdf"));
    }

    #[test]
    fn reroot_rejects_foreign_paths() {
        let err = reroot(Path::new("/in"), Path::new("/out"), Path::new("/elsewhere/x.pdf"));
        assert!(matches!(err, Err(Error::Path(_))));
    }

    #[test]
    fn display_key_uses_forward_slashes() {
        let rel: PathBuf = ["sub", "deeper", "b.pdf"].iter().collect();
        assert_eq!(display_key(&rel), "sub/deeper/b.pdf");
    }
}
