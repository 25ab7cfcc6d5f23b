//! File discovery module
//!
//! This module contains components for scanning the bundle root and selecting
//! files by language.

mod filter;
mod scanner;

pub use filter::filter_by_language;
pub use scanner::{discover_files, is_build_output};
