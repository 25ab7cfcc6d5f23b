use std::ffi::OsString;
use std::path::PathBuf;

use atty::Stream;
use clap::{
    Arg, ArgAction, ArgMatches, Command, command, crate_authors, crate_description, crate_name,
    crate_version,
};

use crate::config::{BundleOptions, expand_response_files};
use crate::constants::{
    AUTHOR_HELP, DEFAULT_RESPONSE_FILE, DRY_RUN_HELP, LANGUAGE_HELP, LOG_FILE_DEFAULT,
    LOG_FILE_HELP, LOG_TO_FILE_HELP, NO_RUN_HELP, NOTE_HELP, OUTPUT_HELP,
    REMOVE_EMPTY_LINES_HELP, RESPONSE_FILE_HELP, SORT_HELP, VERBOSE_HELP, WIZARD_HELP,
};
use crate::errors::Result;
use crate::logging::Verbosity;
use crate::utils::resolve_log_path;

/// Name of the wizard subcommand
pub const WIZARD_COMMAND: &str = "wizard";

/// Checks if stdout is a terminal and waits for user input if it is
///
/// Keeps the console window open after the wizard when the program was
/// started by double-clicking it.
pub fn check_for_stdout_stream() {
    if atty::is(Stream::Stdout) {
        dont_disappear::enter_to_continue::default();
    }
}

/// Builds the command-line definition
///
/// Output and language are not marked as required here: missing values are
/// reported by configuration validation like any other invalid value.
pub fn build_command() -> Command {
    let arg_output = Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help(OUTPUT_HELP);

    let arg_language = Arg::new("language")
        .short('l')
        .long("language")
        .value_name("LANG")
        .help(LANGUAGE_HELP)
        .num_args(1..)
        .value_delimiter(',')
        .action(ArgAction::Append);

    let arg_note = Arg::new("note")
        .short('n')
        .long("note")
        .help(NOTE_HELP)
        .action(ArgAction::SetTrue);

    let arg_sort = Arg::new("sort")
        .short('s')
        .long("sort")
        .value_name("MODE")
        .help(SORT_HELP);

    let arg_remove_empty_lines = Arg::new("remove_empty_lines")
        .short('r')
        .long("remove-empty-lines")
        .help(REMOVE_EMPTY_LINES_HELP)
        .action(ArgAction::SetTrue);

    let arg_author = Arg::new("author")
        .short('a')
        .long("author")
        .value_name("NAME")
        .help(AUTHOR_HELP);

    let arg_dry = Arg::new("dry")
        .short('d')
        .long("dry")
        .help(DRY_RUN_HELP)
        .action(ArgAction::SetTrue);

    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count)
        .global(true);

    let log_file = Arg::new("log_file")
        .long("log-file")
        .value_name("FILE")
        .help(LOG_FILE_HELP)
        .default_value(LOG_FILE_DEFAULT)
        .global(true);

    let log_to_file = Arg::new("log_to_file")
        .short('L')
        .long("log-to-file")
        .help(LOG_TO_FILE_HELP)
        .action(ArgAction::SetTrue)
        .global(true);

    let wizard = Command::new(WIZARD_COMMAND)
        .about(WIZARD_HELP)
        .arg(
            Arg::new("response_file")
                .short('f')
                .long("response-file")
                .value_name("FILE")
                .help(RESPONSE_FILE_HELP)
                .default_value(DEFAULT_RESPONSE_FILE),
        )
        .arg(
            Arg::new("no_run")
                .long("no-run")
                .help(NO_RUN_HELP)
                .action(ArgAction::SetTrue),
        );

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .bin_name("fbundle")
        .arg_required_else_help(true)
        .after_help("Arguments can also be read from a file: fbundle @bundle.rsp")
        .arg(arg_output)
        .arg(arg_language)
        .arg(arg_note)
        .arg(arg_sort)
        .arg(arg_remove_empty_lines)
        .arg(arg_author)
        .arg(arg_dry)
        .arg(arg_verbose)
        .arg(log_file)
        .arg(log_to_file)
        .subcommand(wizard)
}

/// Parses the process arguments, expanding `@response-file` references first
///
/// clap prints help and exits on its own for malformed command lines.
///
/// # Errors
/// Returns an error if a referenced response file cannot be loaded
pub fn get_matches() -> Result<ArgMatches> {
    get_matches_from(std::env::args_os())
}

/// Same as [`get_matches`] for an explicit argument list
///
/// # Errors
/// Returns an error if a referenced response file cannot be loaded
pub fn get_matches_from<I, T>(args: I) -> Result<ArgMatches>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = expand_response_files(args)?;
    Ok(build_command().get_matches_from(args))
}

/// Collects the bundling flags into unvalidated options
pub fn get_bundle_options(matches: &ArgMatches) -> BundleOptions {
    BundleOptions {
        output: matches.get_one::<String>("output").cloned(),
        languages: matches
            .get_many::<String>("language")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        note: matches.get_flag("note"),
        sort: matches.get_one::<String>("sort").cloned(),
        remove_empty_lines: matches.get_flag("remove_empty_lines"),
        author: matches.get_one::<String>("author").cloned(),
    }
}

/// Checks if the wizard subcommand was given
pub fn is_wizard_command(matches: &ArgMatches) -> bool {
    matches.subcommand_matches(WIZARD_COMMAND).is_some()
}

/// Gets the path the wizard saves its response file to
pub fn get_response_file_path(matches: &ArgMatches) -> PathBuf {
    matches
        .subcommand_matches(WIZARD_COMMAND)
        .and_then(|wizard| wizard.get_one::<String>("response_file"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESPONSE_FILE))
}

/// Whether the wizard should stop after writing the response file
pub fn is_no_run(matches: &ArgMatches) -> bool {
    matches
        .subcommand_matches(WIZARD_COMMAND)
        .is_some_and(|wizard| wizard.get_flag("no_run"))
}

/// Whether only the file list should be shown
pub fn is_dry_run(matches: &ArgMatches) -> bool {
    matches.get_flag("dry")
}

/// Matches holding the global flags
///
/// Global values flow down into the subcommand, so when the wizard runs its
/// matches see flags given before and after the subcommand name.
fn global_matches(matches: &ArgMatches) -> &ArgMatches {
    matches.subcommand_matches(WIZARD_COMMAND).unwrap_or(matches)
}

/// Gets the verbosity level from the number of `-v` flags
pub fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    Verbosity::from_occurrences(global_matches(matches).get_count("verbose"))
}

/// Gets the log file, `None` unless file logging was requested
///
/// # Errors
/// Returns an error if the per-user data directory cannot be created
pub fn get_log_file(matches: &ArgMatches) -> Result<Option<PathBuf>> {
    let matches = global_matches(matches);
    if !matches.get_flag("log_to_file") {
        return Ok(None);
    }

    let name = matches
        .get_one::<String>("log_file")
        .map(String::as_str)
        .unwrap_or(LOG_FILE_DEFAULT);
    resolve_log_path(name).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        build_command().try_get_matches_from(args).unwrap()
    }

    #[test]
    fn test_command_definition_is_consistent() {
        build_command().debug_assert();
    }

    #[test]
    fn test_bundle_options_from_flags() {
        let matches = parse(&[
            "fbundle", "-o", "out.txt", "-l", "py", "rs", "-n", "-s", "abc", "-r", "-a", "Ada",
        ]);
        let options = get_bundle_options(&matches);

        assert_eq!(options.output.as_deref(), Some("out.txt"));
        assert_eq!(options.languages, vec!["py", "rs"]);
        assert!(options.note);
        assert_eq!(options.sort.as_deref(), Some("abc"));
        assert!(options.remove_empty_lines);
        assert_eq!(options.author.as_deref(), Some("Ada"));
        assert!(!is_dry_run(&matches));
        assert!(!is_wizard_command(&matches));
    }

    #[test]
    fn test_languages_accept_commas_and_repeats() {
        let matches = parse(&["fbundle", "-o", "out.txt", "-l", "py,rs", "--language", "cs"]);
        assert_eq!(get_bundle_options(&matches).languages, vec!["py", "rs", "cs"]);
    }

    #[test]
    fn test_defaults_when_flags_are_absent() {
        let matches = parse(&["fbundle", "-o", "out.txt"]);
        let options = get_bundle_options(&matches);
        assert!(options.languages.is_empty());
        assert!(!options.note);
        assert_eq!(options.sort, None);
        assert_eq!(options.author, None);
        assert_eq!(get_verbosity(&matches), Verbosity::Info);
        assert_eq!(get_log_file(&matches).unwrap(), None);
    }

    #[test]
    fn test_wizard_subcommand() {
        let matches = parse(&["fbundle", "wizard", "-v"]);
        assert!(is_wizard_command(&matches));
        assert_eq!(get_response_file_path(&matches), PathBuf::from(DEFAULT_RESPONSE_FILE));
        assert!(!is_no_run(&matches));
        assert_eq!(get_verbosity(&matches), Verbosity::Debug);

        let matches = parse(&["fbundle", "wizard", "--response-file", "mine.rsp", "--no-run"]);
        assert_eq!(get_response_file_path(&matches), PathBuf::from("mine.rsp"));
        assert!(is_no_run(&matches));
    }
}
