//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. Flags may appear before or after
//! a subcommand; `--help` and `--version` take precedence over everything else.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the render loop with these settings
    Run {
        debug_enabled: bool,
        dry_run: bool,
        config_dir: Option<String>,
        log_file: Option<String>,
    },
    /// Print the phrase for a clock time
    PhraseCommand { time: String },
    /// Run the loop in dry-run mode on a fast-forward clock
    SimulateCommand {
        debug_enabled: bool,
        start_time: String,
        end_time: String,
        config_dir: Option<String>,
        log_file: Option<String>,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or malformed arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut dry_run = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut config_dir: Option<String> = None;
        let mut log_file: Option<String> = None;
        let mut positional: Vec<String> = Vec::new();
        let mut error_found = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut iter = args_vec.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" | "-d" => debug_enabled = true,
                "--dry-run" | "-n" => dry_run = true,
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--config" | "-c" => match iter.next() {
                    Some(dir) if !dir.starts_with('-') => config_dir = Some(dir.clone()),
                    _ => {
                        log_warning_standalone!("Missing directory for --config");
                        error_found = true;
                    }
                },
                "--log" | "-l" => match iter.next() {
                    Some(file) if !file.starts_with('-') => log_file = Some(file.clone()),
                    _ => {
                        log_warning_standalone!("Missing file for --log");
                        error_found = true;
                    }
                },
                other if other.starts_with('-') => {
                    log_warning_standalone!("Unknown argument: {}", other);
                    error_found = true;
                }
                _ => positional.push(arg.clone()),
            }
        }

        // Version takes precedence over help, help over errors
        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if error_found {
            CliAction::ShowHelpDueToError
        } else {
            match positional.first().map(String::as_str) {
                None => CliAction::Run {
                    debug_enabled,
                    dry_run,
                    config_dir,
                    log_file,
                },
                Some("phrase" | "p") => match positional.as_slice() {
                    [_, time] => CliAction::PhraseCommand { time: time.clone() },
                    _ => {
                        log_warning_standalone!(
                            "Invalid phrase arguments. Usage: wordclock phrase <HH:MM>"
                        );
                        CliAction::ShowHelpDueToError
                    }
                },
                Some("simulate" | "S") => match positional.as_slice() {
                    [_, start, end] => CliAction::SimulateCommand {
                        debug_enabled,
                        start_time: start.clone(),
                        end_time: end.clone(),
                        config_dir,
                        log_file,
                    },
                    _ => {
                        log_warning_standalone!(
                            "Invalid simulate arguments. Usage: wordclock simulate \"<YYYY-MM-DD HH:MM:SS>\" \"<YYYY-MM-DD HH:MM:SS>\""
                        );
                        CliAction::ShowHelpDueToError
                    }
                },
                Some(command) => {
                    log_warning_standalone!("Unknown command: {}", command);
                    CliAction::ShowHelpDueToError
                }
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("wordclock [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-n, --dry-run          Log phrases instead of driving the strip");
    log_indented!("-l, --log <file>       Also write output to a file");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("phrase, p <HH:MM>      Print the phrase shown at a time");
    log_indented!("simulate, S <start> <end>");
    log_indented!("                       Fast-forward the clock between two local times");
    log_indented!("                       (\"YYYY-MM-DD HH:MM:SS\") in dry-run mode");
    log_end!();
}
