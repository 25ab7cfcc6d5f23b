//! Bundling pipeline
//!
//! Discovery, language filtering, ordering and assembly run strictly one
//! after another. Nothing is written before a non-empty, ordered file list
//! exists, so a failed filter never leaves an output file behind.

mod assemble;
mod order;

use std::env;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::BundleConfig;
use crate::discovery::{discover_files, filter_by_language};
use crate::errors::{Result, io_error};

pub use assemble::{assemble, read_source, remove_empty_lines, write_bundle};
pub use order::order_files;

/// Outcome of a successful bundle run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
    /// Absolute path of the written bundle
    pub output_path: PathBuf,
    /// Number of source files appended
    pub files: usize,
    /// Bytes written to the bundle
    pub bytes: usize,
}

/// Bundles the files below one root directory according to a configuration
#[derive(Debug, Clone)]
pub struct Bundler<'a> {
    config: &'a BundleConfig,
    root: PathBuf,
}

impl<'a> Bundler<'a> {
    pub fn new(config: &'a BundleConfig, root: &Path) -> Self {
        Bundler {
            config,
            root: root.to_path_buf(),
        }
    }

    /// Bundler rooted at the process's current working directory
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined
    pub fn in_current_dir(config: &'a BundleConfig) -> Result<Self> {
        let root = env::current_dir().map_err(|e| io_error(e, PathBuf::from("."), "resolve"))?;
        Ok(Bundler::new(config, &root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path the bundle is written to
    pub fn output_path(&self) -> PathBuf {
        std::path::absolute(&self.config.output_path)
            .unwrap_or_else(|_| self.config.output_path.clone())
    }

    /// Discovers, filters and orders the files that make up the bundle
    ///
    /// # Errors
    /// * `DirectoryNotFound` if the root is missing
    /// * `NoMatch` if no file matches the requested languages
    /// * `AccessDenied` or `Io` if the tree cannot be read
    pub fn plan(&self) -> Result<Vec<PathBuf>> {
        let output = self.output_path();
        let discovered = discover_files(&self.root, Some(output.as_path()))?;
        let selected = filter_by_language(discovered, &self.config.languages)?;
        let ordered = order_files(selected, self.config.sort_mode);
        debug!(
            "Bundling {} files ordered by {:?}",
            ordered.len(),
            self.config.sort_mode
        );
        Ok(ordered)
    }

    /// Runs the whole pipeline and writes the bundle
    ///
    /// # Errors
    /// Any error from [`Bundler::plan`], plus `AccessDenied` or `Io` while
    /// reading sources or writing the bundle. A failure during writing leaves
    /// a partial bundle on disk.
    pub fn bundle(&self) -> Result<BundleReport> {
        let files = self.plan()?;
        let bytes = assemble(self.config, &files)?;
        let report = BundleReport {
            output_path: self.output_path(),
            files: files.len(),
            bytes,
        };
        debug!(
            "Wrote {} files ({} bytes) to {}",
            report.files,
            report.bytes,
            report.output_path.display()
        );
        Ok(report)
    }
}
