use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use encoding_rs::{Encoding, UTF_8};

use crate::constants::{APPLICATION, ORGANIZATION, QUALIFIER};
use crate::errors::{Result, generic_error, io_error};

/// Extension sort key of a path: the file name from its final `.` on
///
/// Includes the dot, and is empty when the file name has no dot at all.
/// `a/b.tar.gz` gives `.gz`, `.gitignore` gives `.gitignore`.
pub fn extension_key(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(index) => name[index..].to_string(),
        None => String::new(),
    }
}

/// Extension of a path without the leading dot, empty when there is none
pub fn bare_extension(path: &Path) -> String {
    extension_key(path).trim_start_matches('.').to_string()
}

/// Decodes file bytes as text
///
/// A byte order mark selects UTF-8 or UTF-16 and is removed; otherwise the
/// bytes are read as UTF-8 with invalid sequences replaced.
pub fn decode_text(bytes: &[u8]) -> String {
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
    text.into_owned()
}

/// Resolves where the log file goes
///
/// Relative names land in the per-user data directory, which is created on
/// demand; absolute paths are used as given.
pub fn resolve_log_path(name: &str) -> Result<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_absolute() {
        return Ok(path);
    }

    let folder = find_project_folder()?;
    Ok(folder.data_dir().join(path))
}

pub(crate) fn find_project_folder() -> Result<ProjectDirs> {
    let folder = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| generic_error("Failed to determine project directories"))?;

    if !folder.data_dir().exists() {
        create_dir_all(folder.data_dir())
            .map_err(|e| io_error(e, folder.data_dir().to_path_buf(), "create directory"))?;
    }
    Ok(folder)
}
