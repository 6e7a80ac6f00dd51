//! Path utilities for locating durable data.
//!
//! Resolves the per-user data directory and expands `~` in configured paths.
//! Only environment variables are consulted, so the functions behave the same
//! in tests as in production.

use std::path::PathBuf;

/// Name of the directory created under the user data directory.
const APP_DIR: &str = "hooklab";

/// Returns the data directory for hooklab storage and logs.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/hooklab`
/// 2. `$HOME/.local/share/hooklab`
/// 3. `./hooklab` when neither variable is set
///
/// # Examples
///
/// ```
/// use hooklab::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("hooklab"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    home_dir().map_or_else(
        || PathBuf::from(APP_DIR),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and `~user` forms, are returned unchanged.
///
/// # Examples
///
/// ```
/// use hooklab::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
