use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use walkdir::WalkDir;

/// Discover the flat list of files to upload from `path`.
///
/// A plain file yields a single-element list containing itself. A directory
/// is walked recursively and every non-directory entry is collected; entries
/// within each directory are visited in file-name order, so the result is
/// deterministic for a given tree. Sub-entries that cannot be read are logged
/// and skipped without stopping the walk. Only a failure to stat `path`
/// itself is an error.
pub fn local_files(path: &Path) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("failed to stat local path {}", path.display()))?;

    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_dir() {
                    files.push(entry.path().to_path_buf());
                }
            }
            Err(e) => {
                let offending = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                warn!(
                    path = %offending,
                    error = %e,
                    "failed to access path during traversal, continuing"
                );
            }
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn single_file_yields_itself() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "hi").unwrap();

        let files = local_files(&file).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn directory_yields_all_files_and_no_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("y.txt"), "y").unwrap();
        fs::create_dir(dir.path().join("empty-sub")).unwrap();

        let files = local_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&dir.path().join("x.txt")));
        assert!(files.contains(&dir.path().join("sub").join("y.txt")));
    }

    #[test]
    fn traversal_order_is_file_name_order_per_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.txt"), "c").unwrap();

        let files = local_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("a.txt"),
                dir.path().join("b.txt"),
                dir.path().join("sub").join("c.txt"),
            ]
        );
    }

    #[test]
    fn empty_directory_yields_no_files() {
        let dir = tempdir().unwrap();
        let files = local_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn unreadable_subdirectory_is_skipped_and_siblings_survive() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readable.txt"), "ok").unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.txt"), "hidden").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind for root; nothing to observe then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let files = local_files(dir.path()).unwrap();

        // Restore so tempdir cleanup can remove the tree.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(files, vec![dir.path().join("readable.txt")]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = local_files(&missing).unwrap_err();
        assert!(err.to_string().contains("failed to stat local path"));
    }
}
