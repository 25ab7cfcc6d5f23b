//! Bundle assembly
//!
//! Writes the header, source notes and file contents to the output file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::trace;

use crate::config::BundleConfig;
use crate::constants::{AUTHOR_PREFIX, SOURCE_PREFIX};
use crate::errors::{Result, io_error};
use crate::utils::decode_text;

/// Drops empty and whitespace-only lines
///
/// `\r` and `\n` are both treated as separators, so `\r\n` endings and
/// stray carriage returns never produce a blank line of their own. The
/// remaining lines are joined with `\n`.
pub fn remove_empty_lines(content: &str) -> String {
    content
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads a source file as text
///
/// # Errors
/// Returns `AccessDenied` or `Io` if the file cannot be read
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| io_error(e, path.to_path_buf(), "read"))?;
    Ok(decode_text(&bytes))
}

/// Line-oriented writer that tags failures with the output path
struct BundleWriter<W: Write> {
    inner: W,
    path: PathBuf,
    bytes: usize,
}

impl<W: Write> BundleWriter<W> {
    fn new(inner: W, path: &Path) -> Self {
        BundleWriter {
            inner,
            path: path.to_path_buf(),
            bytes: 0,
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.inner
            .write_all(line.as_bytes())
            .and_then(|_| self.inner.write_all(b"\n"))
            .map_err(|e| io_error(e, self.path.clone(), "write"))?;
        self.bytes += line.len() + 1;
        Ok(())
    }

    fn finish(mut self) -> Result<usize> {
        self.inner
            .flush()
            .map_err(|e| io_error(e, self.path.clone(), "write"))?;
        Ok(self.bytes)
    }
}

/// Writes the bundle for `files` to `out`, returning the number of bytes written
///
/// `label` names the destination in error messages.
///
/// # Errors
/// Returns the first read or write failure; everything written before it
/// stays in `out`
pub fn write_bundle<W: Write>(
    out: W,
    label: &Path,
    config: &BundleConfig,
    files: &[PathBuf],
) -> Result<usize> {
    let mut writer = BundleWriter::new(out, label);

    if let Some(author) = &config.author {
        writer.write_line(&format!("{AUTHOR_PREFIX}{author}"))?;
    }

    for file in files {
        trace!("Appending {}", file.display());
        if config.include_source_note {
            let absolute = std::path::absolute(file).unwrap_or_else(|_| file.clone());
            writer.write_line(&format!("{SOURCE_PREFIX}{}", absolute.display()))?;
        }

        let content = read_source(file)?;
        if config.remove_empty_lines {
            writer.write_line(&remove_empty_lines(&content))?;
        } else {
            writer.write_line(&content)?;
        }
    }

    writer.finish()
}

/// Creates (or truncates) the output file and writes the bundle into it
///
/// The file handle is released on every path. If an error happens after
/// some files were written, the partial bundle is left on disk.
///
/// # Arguments
/// * `config` - Output path and content options
/// * `files` - Files to append, already filtered and ordered
///
/// # Returns
/// The number of bytes written to the bundle
///
/// # Errors
/// Returns `AccessDenied` or `Io` if the output cannot be created or written,
/// or a source file cannot be read
pub fn assemble(config: &BundleConfig, files: &[PathBuf]) -> Result<usize> {
    let output = &config.output_path;
    let file = File::create(output).map_err(|e| io_error(e, output.clone(), "create"))?;
    write_bundle(BufWriter::new(file), output, config, files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LanguageSelection, SortMode};
    use crate::errors::Error;
    use tempfile::tempdir;

    fn config() -> BundleConfig {
        BundleConfig {
            output_path: PathBuf::from("bundle.txt"),
            languages: LanguageSelection::All,
            include_source_note: false,
            sort_mode: SortMode::None,
            remove_empty_lines: false,
            author: None,
        }
    }

    #[test]
    fn test_remove_empty_lines() {
        assert_eq!(remove_empty_lines("a\n\nb\r\n  \r\n\tc\n"), "a\nb\n\tc");
        assert_eq!(remove_empty_lines("\n \n\t\n"), "");
        assert_eq!(remove_empty_lines("one\rtwo"), "one\ntwo");
    }

    #[test]
    fn test_remove_empty_lines_is_idempotent() {
        let samples = ["x\r\n\r\ny \n\n  z", "", "\n\n", "no breaks", " lead\n\ntrail \r"];
        for sample in samples {
            let once = remove_empty_lines(sample);
            assert_eq!(remove_empty_lines(&once), once, "sample: {sample:?}");
        }
    }

    #[test]
    fn test_write_bundle_with_header_and_notes() {
        let temp_dir = tempdir().unwrap();
        let first = temp_dir.path().join("a.py");
        let second = temp_dir.path().join("b.py");
        fs::write(&first, "print(1)\n\nprint(2)").unwrap();
        fs::write(&second, "x = 1").unwrap();

        let mut config = config();
        config.author = Some("Ada".to_string());
        config.include_source_note = true;
        config.remove_empty_lines = true;

        let mut out = Vec::new();
        let bytes = write_bundle(
            &mut out,
            Path::new("bundle.txt"),
            &config,
            &[first.clone(), second.clone()],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = format!(
            "// Author: Ada\n// Source: {}\nprint(1)\nprint(2)\n// Source: {}\nx = 1\n",
            first.display(),
            second.display()
        );
        assert_eq!(text, expected);
        assert_eq!(bytes, expected.len());
    }

    #[test]
    fn test_write_bundle_keeps_raw_content() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("a.rs");
        fs::write(&file, "fn main() {}\n\n").unwrap();

        let mut out = Vec::new();
        write_bundle(&mut out, Path::new("bundle.txt"), &config(), &[file]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "fn main() {}\n\n\n");
    }

    #[test]
    fn test_missing_source_stops_the_bundle() {
        let temp_dir = tempdir().unwrap();
        let present = temp_dir.path().join("a.py");
        fs::write(&present, "kept").unwrap();
        let missing = temp_dir.path().join("gone.py");

        let mut out = Vec::new();
        let result = write_bundle(
            &mut out,
            Path::new("bundle.txt"),
            &config(),
            &[present, missing],
        );
        assert!(matches!(result, Err(Error::Io { .. })));
        assert_eq!(String::from_utf8(out).unwrap(), "kept\n");
    }

    #[test]
    fn test_assemble_truncates_existing_output() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("a.py");
        fs::write(&source, "new").unwrap();
        let output = temp_dir.path().join("bundle.txt");
        fs::write(&output, "old content that is longer").unwrap();

        let mut config = config();
        config.output_path = output.clone();
        assemble(&config, &[source]).unwrap();

        assert_eq!(fs::read_to_string(output).unwrap(), "new\n");
    }

    #[test]
    fn test_assemble_into_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let mut config = config();
        config.output_path = temp_dir.path().join("missing/bundle.txt");

        let result = assemble(&config, &[]);
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
