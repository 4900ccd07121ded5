//! Path manipulation utilities for the Zellij sandbox environment.

use std::path::PathBuf;

/// Returns the data directory for zforum files.
///
/// `/host/.local/share/zellij/zforum` in the sandbox. `/host` is the cwd of
/// the last focused terminal, usually the user's home directory, so this is
/// typically `~/.local/share/zellij/zforum` on the host. Only the trace file
/// is written here; posts themselves are never persisted.
///
/// # Examples
///
/// ```
/// use zforum::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zforum"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zforum")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use zforum::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Turns a path from the plugin configuration into a sandbox path.
///
/// Blank values are treated as unset.
#[must_use]
pub fn resolve_config_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(expand_tilde(trimmed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_paths_are_mapped_into_the_sandbox() {
        assert_eq!(
            resolve_config_path(" ~/my-theme.toml "),
            Some(PathBuf::from("/host/my-theme.toml"))
        );
        assert_eq!(resolve_config_path("/etc/theme.toml"), Some(PathBuf::from("/etc/theme.toml")));
        assert_eq!(resolve_config_path("  "), None);
    }

    #[test]
    fn tilde_inside_a_path_is_left_alone() {
        assert_eq!(expand_tilde("/tmp/~cache"), "/tmp/~cache");
    }
}
