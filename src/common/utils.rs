//! Small helpers shared across modules.

use std::path::Path;

/// Format a path for display, replacing the home directory with `~`.
///
/// Keeps user names out of logs that may be shared in bug reports.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}
