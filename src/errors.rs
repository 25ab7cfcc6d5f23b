use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the File Bundle application
#[derive(Debug)]
pub enum Error {
    /// Output path is missing or does not end with the required extension
    InvalidOutputPath { path: String },
    /// Language list is empty or contains a blank token
    NoLanguagesSpecified,
    /// Sort value outside the recognised set
    InvalidSortMode { value: String },
    /// Language filter left nothing to bundle
    NoMatch { languages: String },
    /// Root directory of the traversal does not exist
    DirectoryNotFound { path: PathBuf },
    /// Permission failure while reading or writing
    AccessDenied {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Any other I/O failure
    Io {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Value holds a double quote, which a response file cannot carry
    QuoteInValue { field: String, value: String },
    /// Response file could not be read or parsed
    ResponseFile { path: PathBuf, detail: String },
    /// Generic error with a message
    Generic { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOutputPath { path } => {
                if path.trim().is_empty() {
                    write!(f, "No output path given; it must end with .txt")
                } else {
                    write!(f, "Invalid output path '{path}': it must end with .txt")
                }
            }
            Error::NoLanguagesSpecified => {
                write!(f, "No languages specified; give at least one extension or 'all'")
            }
            Error::InvalidSortMode { value } => {
                write!(f, "Invalid sort mode '{value}': expected 'abc', 'type' or nothing")
            }
            Error::NoMatch { languages } => {
                write!(f, "No files found for the requested languages: {languages}")
            }
            Error::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}", path.display())
            }
            Error::AccessDenied {
                path, operation, ..
            } => {
                write!(f, "Access denied while trying to {} {}", operation, path.display())
            }
            Error::Io {
                source,
                path,
                operation,
            } => {
                write!(f, "Failed to {} {}: {}", operation, path.display(), source)
            }
            Error::QuoteInValue { field, value } => {
                write!(f, "Invalid {field} '{value}': double quotes are not allowed")
            }
            Error::ResponseFile { path, detail } => {
                write!(f, "Invalid response file {}: {}", path.display(), detail)
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::AccessDenied { source, .. } => Some(source),
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        io_error(err, PathBuf::new(), "access")
    }
}

/// Custom Result type for the File Bundle application
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create an invalid output path error
pub fn invalid_output_path_error(path: &str) -> Error {
    Error::InvalidOutputPath {
        path: path.to_string(),
    }
}

/// Helper function to create a missing languages error
pub fn no_languages_error() -> Error {
    Error::NoLanguagesSpecified
}

/// Helper function to create an invalid sort mode error
pub fn invalid_sort_mode_error(value: &str) -> Error {
    Error::InvalidSortMode {
        value: value.to_string(),
    }
}

/// Helper function to create a no-match error
pub fn no_match_error(languages: &str) -> Error {
    Error::NoMatch {
        languages: languages.to_string(),
    }
}

/// Helper function to create a directory not found error
pub fn directory_not_found_error(path: PathBuf) -> Error {
    Error::DirectoryNotFound { path }
}

/// Helper function to create an access denied error
pub fn access_denied_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::AccessDenied {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Classifies an I/O failure into the access-denied or generic I/O category
pub fn io_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    match err.kind() {
        io::ErrorKind::PermissionDenied => access_denied_error(err, path, operation),
        _ => Error::Io {
            source: err,
            path,
            operation: operation.to_string(),
        },
    }
}

/// Helper function to create an error for a value holding a double quote
pub fn quote_in_value_error(field: &str, value: &str) -> Error {
    Error::QuoteInValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Helper function to create a response file error
pub fn response_file_error(path: PathBuf, detail: &str) -> Error {
    Error::ResponseFile {
        path,
        detail: detail.to_string(),
    }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}
