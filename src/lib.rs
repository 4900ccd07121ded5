//! zforum: a small in-memory discussion board running as a Zellij plugin.
//!
//! zforum keeps a list of posts for the lifetime of the plugin and lets the
//! user browse, search and discuss them from a terminal pane:
//! - Create posts with a required title, optional content and image URL
//! - Upvote, comment on, edit and delete posts
//! - Filter the home list by title and sort it by recency or upvotes
//! - Open a post's image URL through a host command

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Page navigation and drafts                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────────────┐           ┌───────────────────────┐
//! │ UI Layer (ui/)        │           │ Store Layer (store/)  │
//! │ - Rendering           │           │ - Post store          │
//! │ - Theming             │           │ - Search and sort     │
//! │ - Components          │           │   projection          │
//! └───────────────────────┘           └───────────────────────┘
//!         │                                       │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Post model (domain/post)                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - Rotating OTLP-JSON trace file                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (Post, errors)
//! - [`store`]: Post storage and the home list projection
//! - [`infrastructure`]: Sandbox path utilities
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zforum.wasm" {
//!         theme "catppuccin-latte"
//!         default_sort "upvotes"
//!         open_command "xdg-open"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! Posts are never written to disk; closing the plugin discards them.
//!
//! # Example
//!
//! ```rust
//! use zforum::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! for event in [Event::NewPost, Event::Char('H'), Event::Char('i'), Event::Submit] {
//!     let (_should_render, _actions) = handle_event(&mut state, &event)?;
//! }
//!
//! assert_eq!(state.store.len(), 1);
//! assert_eq!(state.projected[0].title, "Hi");
//! # Ok::<(), zforum::ZforumError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod store;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{Post, PostFields, PostId, Result, ZforumError};
pub use store::{PostStore, SortMode};
pub use ui::Theme;

use std::collections::BTreeMap;

use infrastructure::resolve_config_path;

/// Command used to open image URLs when none is configured.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/zforum.wasm" {
///     theme "catppuccin-mocha"
///     theme_file "~/.config/zforum/theme.toml"
///     default_sort "newest"
///     open_command "open"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,

    /// Order of the home list when the plugin starts.
    pub default_sort: SortMode,

    /// Program run with a post's image URL as its only argument.
    pub open_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: None,
            theme_file: None,
            trace_level: None,
            default_sort: SortMode::default(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored and invalid values fall back to defaults, so
    /// a typo in the layout never keeps the plugin from loading.
    ///
    /// # Parsing Rules
    ///
    /// - `theme`, `theme_file`, `trace_level`: blank values are treated as unset
    /// - `default_sort`: `newest` or `upvotes` (also `top`), else `newest`
    /// - `open_command`: blank values fall back to `xdg-open`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zforum::{Config, SortMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_sort".to_string(), "upvotes".to_string());
    /// map.insert("open_command".to_string(), "open".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.default_sort, SortMode::Upvotes);
    /// assert_eq!(config.open_command, "open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let default_sort = non_blank("default_sort").map_or_else(SortMode::default, |raw| {
            raw.parse().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "invalid default_sort, using newest");
                SortMode::default()
            })
        });

        Self {
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file"),
            trace_level: non_blank("trace_level"),
            default_sort,
            open_command: non_blank("open_command")
                .unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string()),
        }
    }

    /// Resolves the configured theme: file first, then built-in name, then
    /// the default. Failures are logged and fall through to the next source.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(path) = self.theme_file.as_deref().and_then(resolve_config_path) {
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %path.display(), error = %e, "failed to load theme from file");
                }
            }
        }

        if let Some(name) = &self.theme_name {
            if let Some(theme) = Theme::from_name(name) {
                return theme;
            }
            tracing::warn!(theme_name = %name, "unknown theme, using default");
        }

        Theme::default()
    }
}

/// Initializes the plugin with configuration.
///
/// Creates an `AppState` with an empty store, the configured theme and the
/// configured sort order. Tracing is set up separately by
/// [`observability::init_tracing`].
///
/// # Example
///
/// ```rust
/// use zforum::{initialize, Config, SortMode};
///
/// let config = Config {
///     default_sort: SortMode::Upvotes,
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert!(state.store.is_empty());
/// assert_eq!(state.sort_mode, SortMode::Upvotes);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(sort = %config.default_sort, "initializing zforum plugin");
    AppState::new(config.load_theme(), config.default_sort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_and_blank_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("default_sort", "sideways"),
            ("open_command", "   "),
            ("theme", ""),
        ]));

        assert_eq!(config.default_sort, SortMode::Recency);
        assert_eq!(config.open_command, DEFAULT_OPEN_COMMAND);
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn values_are_trimmed() {
        let config = Config::from_zellij(&map(&[
            ("default_sort", " top "),
            ("trace_level", " debug "),
        ]));

        assert_eq!(config.default_sort, SortMode::Upvotes);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn theme_resolution_order() {
        let latte = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };
        assert_eq!(latte.load_theme().name, "catppuccin-latte");

        let unknown = Config {
            theme_name: Some("solarized".to_string()),
            ..Default::default()
        };
        assert_eq!(unknown.load_theme(), Theme::default());

        let missing_file = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };
        assert_eq!(missing_file.load_theme().name, "catppuccin-latte");
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut custom = Theme::default();
        custom.name = "custom".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes())
            .unwrap();

        let config = Config {
            theme_file: Some(file.path().display().to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };

        assert_eq!(config.load_theme().name, "custom");
    }

    #[test]
    fn initialize_starts_empty() {
        let state = initialize(&Config::default());
        assert!(state.store.is_empty());
        assert!(state.projected.is_empty());
        assert_eq!(state.sort_mode, SortMode::Recency);
    }
}
