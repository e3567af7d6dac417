//! Structured logging system with visual formatting.
//!
//! This module provides the box-drawing log output used throughout wordclock.
//! Every macro funnels through [`write_output`], which either prints to stdout
//! or, when `--log <file>` is active, hands the line to a background writer
//! thread that strips ANSI color codes before writing.
//!
//! The logger supports runtime enable/disable for quiet operation during
//! tests or when printing plain command output.

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

// Channel for routing output to a file when --log is active
static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Main logging interface.
///
/// ## Logging Conventions
///
/// - **`log_block_start!`**: starts a new conceptual block (startup phases,
///   configuration, shutdown). Prints an empty pipe `┃` then `┣ message`.
/// - **`log_decorated!`**: a line belonging to the current block, `┣ message`.
/// - **`log_indented!`**: nested detail under a block line, `┃   message`.
/// - **`log_pipe!`**: a single empty `┃` line, used before semantic messages
///   (`log_warning!`, `log_error!`, `log_info!`, `log_debug!`, `log_critical!`).
/// - **`log_version!`**: the startup header, `┏ wordclock vX.Y.Z ━━╸`.
/// - **`log_end!`**: the final termination marker `╹`.
/// - **`log_error_exit!`**: closes the log with an error line, `┗[ERROR] ...`.
pub struct Log;

impl Log {
    /// Enable or disable logging.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Start file logging to the specified path.
    ///
    /// All subsequent log lines are written to the file instead of stdout.
    /// The returned guard flushes and joins the writer thread when dropped.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => {
                        file.write_all(text.as_bytes())?;
                    }
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }
}

/// Guard for file logging that ensures clean shutdown.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Remove ANSI escape sequences (`ESC [ ... m`) from text.
pub(crate) fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

// Public because the exported macros expand to it
pub fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

// # Logging Macros

/// Shared expansion for every logging macro: formats the message and wraps it
/// with the given line template (`{}` is replaced by the message).
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($template:literal, $fmt:literal $($arg:tt)*) => {{
        if $crate::common::logger::Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::common::logger::write_output(&format!($template, message));
        }
    }};
    ($template:literal, $expr:expr) => {{
        if $crate::common::logger::Log::is_enabled() {
            let message = $expr;
            $crate::common::logger::write_output(&format!($template, message));
        }
    }};
}

/// Log a decorated message as part of the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => { $crate::__log_line!("┣ {}\n", $($arg)+) };
}

/// Log an indented detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => { $crate::__log_line!("┃   {}\n", $($arg)+) };
}

/// Log a block start message, initiating a new conceptual block.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => { $crate::__log_line!("┃\n┣ {}\n", $($arg)+) };
}

/// Log a warning message with yellow level tag.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => { $crate::__log_line!("┣[\x1b[33mWARNING\x1b[0m] {}\n", $($arg)+) };
}

/// Log a warning without the pipe prefix, for output outside a log block.
#[macro_export]
macro_rules! log_warning_standalone {
    ($($arg:tt)+) => { $crate::__log_line!("[\x1b[33mWARNING\x1b[0m] {}\n", $($arg)+) };
}

/// Log an error message with red level tag.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => { $crate::__log_line!("┣[\x1b[31mERROR\x1b[0m] {}\n", $($arg)+) };
}

/// Log an error that terminates the current flow.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => { $crate::__log_line!("┃\n┗[\x1b[31mERROR\x1b[0m] {}\n", $($arg)+) };
}

/// Log an informational message with green level tag.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => { $crate::__log_line!("┣[\x1b[32mINFO\x1b[0m] {}\n", $($arg)+) };
}

/// Log a debug/operational message.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => { $crate::__log_line!("┣[\x1b[32mDEBUG\x1b[0m] {}\n", $($arg)+) };
}

/// Log a critical message with red level tag.
#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)+) => { $crate::__log_line!("┣[\x1b[31mCRITICAL\x1b[0m] {}\n", $($arg)+) };
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        if $crate::common::logger::Log::is_enabled() {
            $crate::common::logger::write_output("┃\n");
        }
    }};
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {{
        if $crate::common::logger::Log::is_enabled() {
            let version = env!("CARGO_PKG_VERSION");
            $crate::common::logger::write_output(&format!("┏ wordclock v{version} ━━╸\n"));
        }
    }};
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {{
        if $crate::common::logger::Log::is_enabled() {
            $crate::common::logger::write_output("╹\n");
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_codes_removes_color_sequences() {
        let colored = "┣[\x1b[33mWARNING\x1b[0m] night curve skipped\n";
        assert_eq!(
            strip_ansi_codes(colored),
            "┣[WARNING] night curve skipped\n"
        );
    }

    #[test]
    fn test_strip_ansi_codes_keeps_plain_text() {
        assert_eq!(strip_ansi_codes("┃   it is half past ten"), "┃   it is half past ten");
    }

    #[test]
    fn test_strip_ansi_codes_lone_escape_is_kept() {
        assert_eq!(strip_ansi_codes("a\x1bb"), "a\x1bb");
    }
}
