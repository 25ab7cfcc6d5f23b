//! Directory scanning functionality
//!
//! This module contains functions for recursively listing the files below the
//! bundle root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};
use log::{debug, trace};

use crate::constants::BUILD_OUTPUT_DIRS;
use crate::errors::{Result, directory_not_found_error, generic_error, io_error};

/// Recursively lists every regular file below `root`
///
/// Files inside a build output directory (`bin`, `obj`, `debug`, `release`,
/// matched case-insensitively below `root`) are skipped, as is `exclude` when
/// it names one of the discovered files. Symlinked directories below `root`
/// are not followed, so a link back into the tree cannot list a file twice.
///
/// # Arguments
/// * `root` - Directory to scan
/// * `exclude` - The bundle being written, if it may already exist below `root`
///
/// # Returns
/// The discovered files in enumeration order, which carries no guarantee
///
/// # Errors
/// * `DirectoryNotFound` if `root` is not an existing directory
/// * `AccessDenied` or `Io` if a directory below `root` cannot be read
pub fn discover_files(root: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(directory_not_found_error(root.to_path_buf()));
    }

    let root_str = root
        .to_str()
        .ok_or_else(|| generic_error(&format!("Root path is not valid unicode: {}", root.display())))?;
    let pattern = Path::new(&Pattern::escape(root_str)).join("**").join("*");
    let pattern = pattern.to_string_lossy();
    debug!("Scanning directory: {}", root.display());

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let entries = glob_with(&pattern, options).map_err(|e| generic_error(&e.to_string()))?;

    let excluded = exclude.and_then(|path| fs::canonicalize(path).ok());
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            io_error(e.into(), path, "read directory")
        })?;

        if !path.is_file() {
            continue;
        }
        if is_behind_symlink(root, &path) {
            trace!("Skipping symlinked directory entry: {}", path.display());
            continue;
        }
        if is_build_output(root, &path) {
            trace!("Skipping build output: {}", path.display());
            continue;
        }
        if let Some(excluded) = &excluded
            && is_same_file(&path, excluded)
        {
            debug!("Skipping the bundle itself: {}", path.display());
            continue;
        }

        trace!("Discovered {}", path.display());
        files.push(path);
    }

    debug!("Found {} files below {}", files.len(), root.display());
    Ok(files)
}

/// Whether a directory between `root` and the file is a build output directory
///
/// Only the part of `path` below `root` is checked; a root that itself lives
/// under a `bin` or `debug` directory does not exclude its files.
pub fn is_build_output(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let Some(parent) = relative.parent() else {
        return false;
    };

    parent.components().any(|component| match component {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            BUILD_OUTPUT_DIRS
                .iter()
                .any(|dir| name.eq_ignore_ascii_case(dir))
        }
        _ => false,
    })
}

/// Whether a directory between `root` and the file is a symbolic link
fn is_behind_symlink(root: &Path, path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .take_while(|ancestor| *ancestor != root && ancestor.starts_with(root))
        .any(|ancestor| {
            fs::symlink_metadata(ancestor).is_ok_and(|metadata| metadata.file_type().is_symlink())
        })
}

fn is_same_file(path: &Path, canonical: &Path) -> bool {
    path.file_name() == canonical.file_name()
        && fs::canonicalize(path).is_ok_and(|candidate| candidate == canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use tempfile::tempdir;

    #[test]
    fn test_is_build_output() {
        let root = Path::new("/work");
        assert!(is_build_output(root, Path::new("/work/bin/c.py")));
        assert!(is_build_output(root, Path::new("/work/src/Release/app.cs")));
        assert!(is_build_output(root, Path::new("/work/OBJ/x/y.cs")));
        assert!(!is_build_output(root, Path::new("/work/src/binary/a.py")));
        assert!(!is_build_output(root, Path::new("/work/bin")));
        assert!(!is_build_output(Path::new("/debug/project"), Path::new("/debug/project/a.py")));
    }

    #[test]
    fn test_discover_files_recurses_and_skips_build_output() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("Debug")).unwrap();
        fs::write(root.join("a.py"), "a").unwrap();
        fs::write(root.join("src/nested/b.rs"), "b").unwrap();
        fs::write(root.join(".hidden.py"), "h").unwrap();
        fs::write(root.join("Debug/c.py"), "c").unwrap();

        let mut files = discover_files(root, None).unwrap();
        files.sort();

        let mut expected = vec![
            root.join(".hidden.py"),
            root.join("a.py"),
            root.join("src/nested/b.rs"),
        ];
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_discover_files_skips_excluded_output() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("notes.txt"), "n").unwrap();
        fs::write(root.join("bundle.txt"), "old bundle").unwrap();

        let files = discover_files(root, Some(root.join("bundle.txt").as_path())).unwrap();
        assert_eq!(files, vec![root.join("notes.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_files_does_not_follow_directory_links() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.py"), "a").unwrap();
        std::os::unix::fs::symlink(root, root.join("loop")).unwrap();

        let files = discover_files(root, None).unwrap();
        assert_eq!(files, vec![root.join("a.py")], "Each file should be listed once");
    }

    #[test]
    fn test_discover_files_missing_root() {
        let temp_dir = tempdir().unwrap();
        let result = discover_files(&temp_dir.path().join("missing"), None);
        assert!(matches!(result, Err(Error::DirectoryNotFound { .. })));
    }
}
