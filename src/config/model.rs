//! Configuration data structures
//!
//! This module contains the raw option set collected from the command line or
//! the wizard, and the validated configuration the bundler consumes.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use shellexpand::tilde;

use crate::constants::{ALL_LANGUAGES, OUTPUT_EXTENSION, SORT_ALPHABETICAL, SORT_BY_EXTENSION};
use crate::errors::{
    Error, Result, invalid_output_path_error, invalid_sort_mode_error, no_languages_error,
    quote_in_value_error,
};

/// How discovered files are ordered in the bundle
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep discovery order
    #[default]
    None,
    /// Full path, ascending, ordinal
    Alphabetical,
    /// Extension first, then full path
    ByExtension,
}

impl SortMode {
    /// The command-line value selecting this mode, `None` for the default
    pub fn as_arg(&self) -> Option<&'static str> {
        match self {
            SortMode::None => None,
            SortMode::Alphabetical => Some(SORT_ALPHABETICAL),
            SortMode::ByExtension => Some(SORT_BY_EXTENSION),
        }
    }
}

impl FromStr for SortMode {
    type Err = Error;

    /// Parses `abc`, `type` or an empty value
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(SortMode::None),
            SORT_ALPHABETICAL => Ok(SortMode::Alphabetical),
            SORT_BY_EXTENSION => Ok(SortMode::ByExtension),
            _ => Err(invalid_sort_mode_error(s)),
        }
    }
}

/// Which files survive the language filter
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSelection {
    /// Every discovered file
    All,
    /// Files whose extension is one of these lowercase tokens
    Only(Vec<String>),
}

impl LanguageSelection {
    /// Builds a selection from raw tokens
    ///
    /// Tokens are trimmed, lowercased and stripped of a leading dot; duplicates
    /// are dropped while keeping the first occurrence. A single `all` token
    /// anywhere in the list selects every file.
    ///
    /// # Errors
    /// Returns `NoLanguagesSpecified` if the list is empty or any token is blank
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        if tokens.is_empty() {
            return Err(no_languages_error());
        }

        let mut languages: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref().trim().trim_start_matches('.').to_lowercase();
            if token.is_empty() {
                return Err(no_languages_error());
            }
            if token == ALL_LANGUAGES {
                return Ok(LanguageSelection::All);
            }
            if !languages.contains(&token) {
                languages.push(token);
            }
        }

        Ok(LanguageSelection::Only(languages))
    }

    /// Whether a bare extension (no dot) is selected
    pub fn matches(&self, extension: &str) -> bool {
        match self {
            LanguageSelection::All => true,
            LanguageSelection::Only(languages) => {
                let extension = extension.to_lowercase();
                languages.iter().any(|language| *language == extension)
            }
        }
    }

    /// Tokens as they are written on the command line
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            LanguageSelection::All => vec![ALL_LANGUAGES],
            LanguageSelection::Only(languages) => languages.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for LanguageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().join(", "))
    }
}

/// Validated bundling configuration
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    /// Where the bundle is written
    pub output_path: PathBuf,
    /// Language filter
    pub languages: LanguageSelection,
    /// Write a source note before every file
    pub include_source_note: bool,
    /// File ordering
    pub sort_mode: SortMode,
    /// Drop empty and whitespace-only lines
    pub remove_empty_lines: bool,
    /// Author header, never blank
    pub author: Option<String>,
}

/// Unvalidated options as collected from flags or wizard answers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleOptions {
    pub output: Option<String>,
    pub languages: Vec<String>,
    pub note: bool,
    pub sort: Option<String>,
    pub remove_empty_lines: bool,
    pub author: Option<String>,
}

impl BundleOptions {
    /// Validates the options into a `BundleConfig`
    ///
    /// Checks run in flag order: output path, languages, then sort mode. No
    /// filesystem access happens here.
    ///
    /// # Errors
    /// * `InvalidOutputPath` if the output is missing or does not end with `.txt`
    /// * `NoLanguagesSpecified` if no usable language token was given
    /// * `InvalidSortMode` if the sort value is not recognised
    /// * `QuoteInValue` if the output path or author contains a double quote
    pub fn validate(&self) -> Result<BundleConfig> {
        let output_path = parse_output_path(self.output.as_deref().unwrap_or_default())?;
        let languages = LanguageSelection::from_tokens(&self.languages)?;
        let sort_mode = self
            .sort
            .as_deref()
            .map(SortMode::from_str)
            .transpose()?
            .unwrap_or_default();

        Ok(BundleConfig {
            output_path,
            languages,
            include_source_note: self.note,
            sort_mode,
            remove_empty_lines: self.remove_empty_lines,
            author: parse_author(self.author.as_deref())?,
        })
    }
}

/// Checks and expands an output path
///
/// # Errors
/// * `InvalidOutputPath` for a blank path or one without the `.txt` extension
/// * `QuoteInValue` if the path contains a double quote
pub fn parse_output_path(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || !trimmed.to_lowercase().ends_with(OUTPUT_EXTENSION)
        || trimmed.len() == OUTPUT_EXTENSION.len()
    {
        return Err(invalid_output_path_error(raw));
    }
    if trimmed.contains('"') {
        return Err(quote_in_value_error("output path", trimmed));
    }

    Ok(PathBuf::from(tilde(trimmed).as_ref()))
}

/// Blank authors count as no author
pub fn normalize_author(author: Option<&str>) -> Option<String> {
    author
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .map(str::to_string)
}

/// Normalises an author and checks it can be written to a response file
///
/// # Errors
/// Returns `QuoteInValue` if the author contains a double quote
pub fn parse_author(author: Option<&str>) -> Result<Option<String>> {
    match normalize_author(author) {
        Some(author) if author.contains('"') => Err(quote_in_value_error("author", &author)),
        author => Ok(author),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(output: &str, languages: &[&str]) -> BundleOptions {
        BundleOptions {
            output: Some(output.to_string()),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            ..BundleOptions::default()
        }
    }

    #[test]
    fn test_sort_mode_from_str() {
        assert_eq!(SortMode::from_str("").unwrap(), SortMode::None);
        assert_eq!(SortMode::from_str("abc").unwrap(), SortMode::Alphabetical);
        assert_eq!(SortMode::from_str("TYPE").unwrap(), SortMode::ByExtension);
        assert!(matches!(
            SortMode::from_str("size"),
            Err(Error::InvalidSortMode { .. })
        ));
    }

    #[test]
    fn test_languages_are_normalised() {
        let selection = LanguageSelection::from_tokens(&["PY", ".rs", "py"]).unwrap();
        assert_eq!(
            selection,
            LanguageSelection::Only(vec!["py".to_string(), "rs".to_string()])
        );
        assert!(selection.matches("Py"));
        assert!(!selection.matches("java"));
    }

    #[test]
    fn test_all_token_selects_everything() {
        let selection = LanguageSelection::from_tokens(&["cs", "All"]).unwrap();
        assert_eq!(selection, LanguageSelection::All);
        assert!(selection.matches(""));
        assert_eq!(selection.tokens(), vec!["all"]);
    }

    #[test]
    fn test_blank_language_is_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            LanguageSelection::from_tokens(&empty),
            Err(Error::NoLanguagesSpecified)
        ));
        assert!(matches!(
            LanguageSelection::from_tokens(&["py", " "]),
            Err(Error::NoLanguagesSpecified)
        ));
    }

    #[test]
    fn test_output_path_extension_is_case_insensitive() {
        assert!(parse_output_path("bundle.TXT").is_ok());
        assert!(matches!(
            parse_output_path("result.md"),
            Err(Error::InvalidOutputPath { .. })
        ));
        assert!(parse_output_path("").is_err());
        assert!(parse_output_path(".txt").is_err());
    }

    #[test]
    fn test_validate_builds_config() {
        let mut raw = options("out.txt", &["py"]);
        raw.sort = Some("abc".to_string());
        raw.author = Some("  Ada ".to_string());
        raw.note = true;

        let config = raw.validate().unwrap();
        assert_eq!(config.output_path, PathBuf::from("out.txt"));
        assert_eq!(config.sort_mode, SortMode::Alphabetical);
        assert_eq!(config.author.as_deref(), Some("Ada"));
        assert!(config.include_source_note);
        assert!(!config.remove_empty_lines);
    }

    #[test]
    fn test_validate_checks_output_first() {
        let mut raw = options("result.md", &[]);
        raw.sort = Some("bogus".to_string());
        assert!(matches!(raw.validate(), Err(Error::InvalidOutputPath { .. })));
    }

    #[test]
    fn test_blank_author_is_dropped() {
        assert_eq!(normalize_author(Some("   ")), None);
        assert_eq!(normalize_author(None), None);
    }

    #[test]
    fn test_double_quotes_are_rejected() {
        assert!(matches!(
            parse_output_path("my \"best\".txt"),
            Err(Error::QuoteInValue { .. })
        ));
        assert!(matches!(
            parse_author(Some("Ada \"Countess\" Lovelace")),
            Err(Error::QuoteInValue { .. })
        ));
        assert_eq!(parse_author(Some(" -anon- ")).unwrap().as_deref(), Some("-anon-"));

        let mut raw = options("out.txt", &["py"]);
        raw.author = Some("\"Ada\"".to_string());
        assert!(matches!(raw.validate(), Err(Error::QuoteInValue { .. })));
    }
}
