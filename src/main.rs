//! Main application entry point.
//!
//! Parses the command line and dispatches to the matching action:
//! - Normal run: `WordClock::new(debug_enabled).run()`
//! - Dry run: `WordClock::new(debug_enabled).dry_run().run()`
//! - One-shot commands: `phrase` and `simulate`

use anyhow::Result;
use wordclock::{
    WordClock,
    args::{self, CliAction, ParsedArgs},
    commands,
    common::constants::EXIT_FAILURE,
    common::logger::{Log, LoggerGuard},
    config, log_error_exit,
};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    if let Err(e) = dispatch(parsed_args.action) {
        log_error_exit!("{}", e);
        for cause in e.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(EXIT_FAILURE);
    }
}

fn dispatch(action: CliAction) -> Result<()> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run {
            debug_enabled,
            dry_run,
            config_dir,
            log_file,
        } => {
            config::set_config_dir(config_dir)?;
            let _log_guard = start_file_logging(log_file)?;

            let runner = WordClock::new(debug_enabled);
            if dry_run {
                runner.dry_run().run()
            } else {
                runner.run()
            }
        }
        CliAction::PhraseCommand { time } => commands::phrase::handle_phrase_command(&time),
        CliAction::SimulateCommand {
            debug_enabled,
            start_time,
            end_time,
            config_dir,
            log_file,
        } => {
            config::set_config_dir(config_dir)?;
            let _log_guard = start_file_logging(log_file)?;

            commands::simulate::handle_simulate_command(&start_time, &end_time, debug_enabled)
        }
    }
}

/// Route log output to `log_file` while the returned guard is alive.
fn start_file_logging(log_file: Option<String>) -> Result<Option<LoggerGuard>> {
    log_file.map(Log::start_file_logging).transpose()
}
