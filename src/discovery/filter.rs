//! Language filtering
//!
//! This module keeps the discovered files whose extension was requested.

use std::path::PathBuf;

use log::debug;

use crate::config::LanguageSelection;
use crate::errors::{Result, no_match_error};
use crate::utils::bare_extension;

/// Keeps the files selected by `languages`, preserving their order
///
/// Extensions are the part of the file name after its final `.`, compared
/// case-insensitively.
///
/// # Arguments
/// * `files` - Discovered files
/// * `languages` - The language selection to apply
///
/// # Returns
/// The selected files, in the order they were given
///
/// # Errors
/// Returns `NoMatch` if no file is left
pub fn filter_by_language(files: Vec<PathBuf>, languages: &LanguageSelection) -> Result<Vec<PathBuf>> {
    let discovered = files.len();
    let selected: Vec<PathBuf> = match languages {
        LanguageSelection::All => files,
        LanguageSelection::Only(_) => files
            .into_iter()
            .filter(|path| languages.matches(&bare_extension(path)))
            .collect(),
    };

    debug!(
        "{} of {} files match languages: {}",
        selected.len(),
        discovered,
        languages
    );

    if selected.is_empty() {
        return Err(no_match_error(&languages.to_string()));
    }
    Ok(selected)
}
