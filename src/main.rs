use clap::ArgMatches;
use colored::Color;
use log::{error, info};

use file_bundle::prelude::*;

fn main() {
    human_panic::setup_panic!();

    let matches = match get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            eprintln!("{}", format_message(&e.to_string(), Color::Red));
            return;
        }
    };

    if let Err(e) = setup_logging(&matches) {
        eprintln!("Failed to initialise logging: {e:#}");
    }

    if is_wizard_command(&matches) {
        run_wizard(&matches);
        check_for_stdout_stream();
    } else {
        run_from_flags(&matches);
    }
}

fn setup_logging(matches: &ArgMatches) -> anyhow::Result<()> {
    let log_file = get_log_file(matches)?;
    init_logger(get_verbosity(matches), log_file.as_deref())
}

fn run_from_flags(matches: &ArgMatches) {
    match get_bundle_options(matches).validate() {
        Ok(config) => bundle_and_report(&config, is_dry_run(matches)),
        Err(e) => report_error(&e),
    }
}

fn run_wizard(matches: &ArgMatches) {
    let response_file = get_response_file_path(matches);
    match create_response_file_with_wizard(&response_file) {
        Ok(_) if is_no_run(matches) => {}
        Ok(config) => bundle_and_report(&config, false),
        Err(e) => error!("{}", format_message(&format!("{e:#}"), Color::Red)),
    }
}

fn bundle_and_report(config: &BundleConfig, dry_run: bool) {
    match perform_bundle(config, dry_run) {
        Ok(Some(report)) => {
            let message = format!(
                "Bundle written to {} ({} files)",
                report.output_path.display(),
                report.files
            );
            info!("{}", format_message(&message, Color::Green));
        }
        Ok(None) => {}
        Err(e) => report_error(&e),
    }
}

fn report_error(e: &Error) {
    error!("{}", format_message(&e.to_string(), Color::Red));
}
