use log::{Level, debug, info, log_enabled};

pub mod bundler;
pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod errors;
pub mod logging;
pub mod utils;

use crate::bundler::{BundleReport, Bundler};
use crate::config::BundleConfig;
use crate::errors::Result;

pub mod prelude {
    pub use crate::bundler::{BundleReport, Bundler};
    pub use crate::cli::{
        check_for_stdout_stream, get_bundle_options, get_log_file, get_matches,
        get_response_file_path, get_verbosity, is_dry_run, is_no_run, is_wizard_command,
    };
    pub use crate::config::{
        BundleConfig, BundleOptions, LanguageSelection, SortMode,
        create_response_file_with_wizard,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::logging::{Verbosity, format_message, init_logger};
    pub use crate::perform_bundle;
}

/// Bundles the current working directory according to `config`
///
/// With `dry_run` the ordered file list is logged and nothing is written;
/// `None` is returned in that case.
///
/// # Errors
/// Returns the error of the first pipeline stage that failed
pub fn perform_bundle(config: &BundleConfig, dry_run: bool) -> Result<Option<BundleReport>> {
    if log_enabled!(Level::Debug) {
        match serde_yaml::to_string(config) {
            Ok(yaml) => debug!("Resolved configuration:\n{}", yaml.trim_end()),
            Err(e) => debug!("Failed to render configuration: {e}"),
        }
    }

    let bundler = Bundler::in_current_dir(config)?;
    debug!("Bundling below {}", bundler.root().display());

    if dry_run {
        let files = bundler.plan()?;
        info!(
            "Dry run: {} files would be written to {}",
            files.len(),
            bundler.output_path().display()
        );
        for file in &files {
            info!("  {}", file.display());
        }
        return Ok(None);
    }

    bundler.bundle().map(Some)
}
