//! Constants used throughout the application
//!
//! This module centralises all constants used in the application to make
//! them easier to manage and update.

/// Extension every bundle output path must carry (checked case-insensitively)
pub const OUTPUT_EXTENSION: &str = ".txt";

/// Language token that disables extension filtering
pub const ALL_LANGUAGES: &str = "all";

/// Directory names whose contents are treated as build output and never bundled
pub const BUILD_OUTPUT_DIRS: [&str; 4] = ["bin", "obj", "debug", "release"];

/// Prefix of the author header line
pub const AUTHOR_PREFIX: &str = "// Author: ";

/// Prefix of the source note written ahead of each file's content
pub const SOURCE_PREFIX: &str = "// Source: ";

/// Sort value selecting alphabetical ordering
pub const SORT_ALPHABETICAL: &str = "abc";

/// Sort value selecting ordering by extension
pub const SORT_BY_EXTENSION: &str = "type";

/// Marker that turns a command-line argument into a response file reference
pub const RESPONSE_FILE_MARKER: char = '@';

/// Qualifier string used for application identification
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
pub const ORGANIZATION: &str = "Ondřej Vágner";

/// Application name used for identification
///
/// This is the name used for the per-user data directory holding log files.
pub const APPLICATION: &str = "file_bundle";

/// Help text for the output command-line option
pub const OUTPUT_HELP: &str = "Path of the bundle to write (must end with .txt)";

/// Help text for the language command-line option
pub const LANGUAGE_HELP: &str =
    "File extensions to bundle, without the dot (use 'all' to bundle every file)";

/// Help text for the note command-line option
pub const NOTE_HELP: &str = "Write a '// Source: <path>' line before each file";

/// Help text for the sort command-line option
pub const SORT_HELP: &str = "Order files alphabetically ('abc') or by extension ('type')";

/// Help text for the remove-empty-lines command-line option
pub const REMOVE_EMPTY_LINES_HELP: &str = "Drop empty and whitespace-only lines";

/// Help text for the author command-line option
pub const AUTHOR_HELP: &str = "Write a '// Author: <name>' line at the top of the bundle";

/// Help text for the dry-run command-line option
pub const DRY_RUN_HELP: &str = "List the files that would be bundled without writing anything";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log-file command-line option
pub const LOG_FILE_HELP: &str = "Name or path of the log file";

/// Help text for the log-to-file command-line option
pub const LOG_TO_FILE_HELP: &str = "Also write log messages to the log file";

/// Help text for the wizard subcommand
pub const WIZARD_HELP: &str = "Answer a few questions, save them as a response file and bundle";

/// Help text for the wizard's response-file option
pub const RESPONSE_FILE_HELP: &str = "Where the wizard saves the generated arguments";

/// Help text for the wizard's no-run option
pub const NO_RUN_HELP: &str = "Only write the response file, do not bundle";

/// Default log file name
pub const LOG_FILE_DEFAULT: &str = "fbundle.log";

/// Default path for the response file written by the wizard
pub const DEFAULT_RESPONSE_FILE: &str = "fbundle.rsp";
