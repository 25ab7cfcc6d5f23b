//! Configuration module
//!
//! This module contains components for validating, persisting, replaying and
//! interactively building a bundling configuration.

pub mod loader;
mod model;
pub mod serializer;
pub mod wizard;

pub use loader::{expand_response_files, read_response_file};
pub use model::{
    BundleConfig, BundleOptions, LanguageSelection, SortMode, normalize_author, parse_author,
    parse_output_path,
};
pub use serializer::{save_response_file, serialize_config};
pub use wizard::{
    Answer, QUESTIONS, Question, build_config, create_response_file_with_wizard, run_wizard,
};
