//! Response file loading
//!
//! Any command-line argument of the form `@path` is replaced by the arguments
//! stored in that file before clap sees the command line.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::RESPONSE_FILE_MARKER;
use crate::errors::{Result, io_error, response_file_error};

/// A double-quoted group or a run of non-whitespace characters
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]*)"|([^\s"]+)"#).expect("Failed to compile regex pattern for TOKEN_PATTERN")
});

/// Splits one response file line into arguments
///
/// Blank lines and lines starting with `#` yield nothing. Double quotes group
/// a value containing spaces and are removed.
///
/// # Errors
/// Returns an error message for an unterminated quote
pub fn tokenize_line(line: &str) -> std::result::Result<Vec<String>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Vec::new());
    }
    if line.matches('"').count() % 2 != 0 {
        return Err(format!("unterminated quote in line: {line}"));
    }

    Ok(TOKEN_PATTERN
        .captures_iter(line)
        .filter_map(|captures| captures.get(1).or_else(|| captures.get(2)))
        .map(|token| token.as_str().to_string())
        .collect())
}

/// Reads every argument stored in a response file
///
/// # Errors
/// Returns an error if the file cannot be read or contains an unterminated quote
pub fn read_response_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| io_error(e, path.to_path_buf(), "read"))?;

    let mut arguments = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let tokens = tokenize_line(line).map_err(|detail| {
            response_file_error(path.to_path_buf(), &format!("line {}: {}", index + 1, detail))
        })?;
        arguments.extend(tokens);
    }

    debug!("Loaded {} arguments from {}", arguments.len(), path.display());
    Ok(arguments)
}

/// Replaces `@path` arguments with the contents of the referenced files
///
/// The first argument (the program name) is never expanded. Response files do
/// not nest: an `@` argument inside a response file is kept as is.
///
/// # Errors
/// Returns an error if a referenced response file cannot be loaded
pub fn expand_response_files<I, T>(args: I) -> Result<Vec<OsString>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut expanded = Vec::new();
    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        let response_path = arg
            .to_str()
            .filter(|_| index > 0)
            .and_then(|value| value.strip_prefix(RESPONSE_FILE_MARKER))
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        match response_path {
            Some(path) => expanded.extend(read_response_file(&path)?.into_iter().map(OsString::from)),
            None => expanded.push(arg),
        }
    }
    Ok(expanded)
}
