//! File ordering

use std::path::PathBuf;

use crate::config::SortMode;
use crate::utils::extension_key;

/// Orders files for the bundle
///
/// Comparisons are ordinal over the raw path bytes, so `B.py` sorts before
/// `a.py`. `ByExtension` groups files by their extension key (leading dot
/// included, empty when there is none) and orders each group by path.
///
/// # Returns
/// The same files in bundle order; `SortMode::None` returns them unchanged
pub fn order_files(mut files: Vec<PathBuf>, mode: SortMode) -> Vec<PathBuf> {
    match mode {
        SortMode::None => {}
        SortMode::Alphabetical => files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str())),
        SortMode::ByExtension => {
            files.sort_by_cached_key(|path| (extension_key(path), path.as_os_str().to_owned()))
        }
    }
    files
}
