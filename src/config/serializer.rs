//! Response file serialisation
//!
//! A response file stores a validated configuration as command-line flags,
//! one flag per line, so it can be replayed with `fbundle @<file>`.

use std::fs;
use std::path::Path;

use log::debug;

use crate::config::model::BundleConfig;
use crate::errors::{Result, io_error};

/// Renders a configuration as response file text
///
/// Lines are written in a fixed order: output, language, note, sort,
/// remove-empty-lines and author. Optional lines are left out when unset.
/// Output and author are joined to their flag with `=` so values starting
/// with `-` are not taken for flags.
pub fn serialize_config(config: &BundleConfig) -> String {
    let mut lines = vec![
        quote(&format!("--output={}", config.output_path.to_string_lossy())),
        format!("--language {}", config.languages.tokens().join(" ")),
    ];

    if config.include_source_note {
        lines.push("--note".to_string());
    }
    if let Some(sort) = config.sort_mode.as_arg() {
        lines.push(format!("--sort {sort}"));
    }
    if config.remove_empty_lines {
        lines.push("--remove-empty-lines".to_string());
    }
    if let Some(author) = &config.author {
        lines.push(quote(&format!("--author={author}")));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Writes a configuration to a response file, replacing any existing file
///
/// # Errors
/// Returns an I/O error (or `AccessDenied`) if the file cannot be written
pub fn save_response_file(config: &BundleConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|e| io_error(e, parent.to_path_buf(), "create directory"))?;
    }

    fs::write(path, serialize_config(config))
        .map_err(|e| io_error(e, path.to_path_buf(), "write"))?;
    debug!("Response file saved to {}", path.display());

    Ok(())
}

/// Wraps tokens containing whitespace in double quotes
fn quote(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{LanguageSelection, SortMode};
    use std::path::PathBuf;

    fn minimal_config() -> BundleConfig {
        BundleConfig {
            output_path: PathBuf::from("bundle.txt"),
            languages: LanguageSelection::Only(vec!["py".to_string(), "rs".to_string()]),
            include_source_note: false,
            sort_mode: SortMode::None,
            remove_empty_lines: false,
            author: None,
        }
    }

    #[test]
    fn test_optional_lines_are_omitted() {
        let text = serialize_config(&minimal_config());
        assert_eq!(text, "--output=bundle.txt\n--language py rs\n");
    }

    #[test]
    fn test_full_config_keeps_line_order() {
        let config = BundleConfig {
            output_path: PathBuf::from("my bundle.txt"),
            languages: LanguageSelection::All,
            include_source_note: true,
            sort_mode: SortMode::ByExtension,
            remove_empty_lines: true,
            author: Some("Ada Lovelace".to_string()),
        };

        let lines: Vec<String> = serialize_config(&config).lines().map(str::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "\"--output=my bundle.txt\"",
                "--language all",
                "--note",
                "--sort type",
                "--remove-empty-lines",
                "\"--author=Ada Lovelace\"",
            ]
        );
    }

    #[test]
    fn test_leading_hyphen_stays_attached_to_its_flag() {
        let config = BundleConfig {
            author: Some("-anon-".to_string()),
            ..minimal_config()
        };
        assert!(serialize_config(&config).ends_with("--author=-anon-\n"));
    }
}
