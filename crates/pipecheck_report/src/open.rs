use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// What to show when opening results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget {
    /// The file itself
    File,
    /// The folder holding the path, or the path if it is a folder
    Folder,
}

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

/// Opens a path with the desktop shell.
///
/// Failures are logged and otherwise ignored.
pub fn open_path(path: &Path, target: OpenTarget) {
    let path = match target {
        OpenTarget::Folder if path.is_file() => path.parent().unwrap_or(path),
        _ => path,
    };

    debug!("Opening {} with {}", path.display(), OPENER);
    if let Err(e) = Command::new(OPENER).arg(path).spawn() {
        warn!("Could not open {}: {}", path.display(), e);
    }
}
