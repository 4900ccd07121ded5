//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the zforum library and
//! the Zellij plugin system. It translates Zellij events into library
//! [`Event`]s, runs [`handle_event`], and carries out the returned
//! [`Action`]s through the Zellij API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `PermissionRequestResult` and
//!    `RunCommandResult` events
//! 3. **Update**: Map keys to events, delegate to the library layer
//! 4. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! Home:
//! - `j`/`Down`, `k`/`Up`: Move the cursor
//! - `Enter`: Open the highlighted post
//! - `n`: New post
//! - `/`: Search (focus the search bar when already searching)
//! - `s`: Toggle sort between newest and top
//! - `u`: Upvote the highlighted post
//! - `Esc`/`b`: Leave search
//! - `q`: Close plugin
//!
//! Post page:
//! - `u`: Upvote, `e`: Edit, `d`: Delete, `c`: Comment, `o`: Open image
//! - `Esc`/`b`: Back to the list
//! - `y`/`n`: Answer the delete prompt
//!
//! While typing (forms, comment, search bar):
//! - Characters go to the focused input, `Backspace` deletes
//! - `Tab`/`Shift+Tab`: Next/previous form field
//! - `Enter`: Submit, `Esc`: Cancel
//! - `Down` in the search bar: Move focus to the results

#![allow(clippy::multiple_crate_versions)]

use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

use zforum::app::{AppState, Page};
use zforum::{Event, InputMode, SearchFocus};

// `register_plugin!` expands to code that expects the prelude in scope.
#[cfg(target_arch = "wasm32")]
use zellij_tile::prelude::*;

#[cfg(target_arch = "wasm32")]
register_plugin!(plugin::State);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("zforum is a Zellij plugin; build it for wasm32-wasip1 and load it from a layout");
}

#[cfg(target_arch = "wasm32")]
mod plugin {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;

    use zforum::{handle_event, Action, Config};

    /// Context key marking `run_command` calls issued for image opening.
    const CONTEXT_KEY: &str = "zforum";
    const OPEN_IMAGE: &str = "open_image";

    /// Plugin state wrapper.
    ///
    /// Wraps the library's `AppState` with the configured open command.
    pub struct State {
        app: zforum::AppState,
        open_command: String,
    }

    impl Default for State {
        fn default() -> Self {
            let config = Config::default();
            Self {
                app: zforum::initialize(&config),
                open_command: config.open_command,
            }
        }
    }

    impl ZellijPlugin for State {
        /// Parses configuration, initializes tracing and application state,
        /// requests permissions and subscribes to events.
        ///
        /// # Permissions
        ///
        /// - `RunCommands`: Run the image open command
        /// - `ChangeApplicationState`: Hide the plugin pane
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            zforum::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(config = ?config, "parsed configuration");
            self.app = zforum::initialize(&config);
            self.open_command.clone_from(&config.open_command);

            request_permission(&[
                PermissionType::RunCommands,
                PermissionType::ChangeApplicationState,
            ]);

            subscribe(&[
                EventType::Key,
                EventType::PermissionRequestResult,
                EventType::RunCommandResult,
            ]);

            tracing::debug!("plugin load complete");
        }

        /// Handles incoming Zellij events. Returns `true` if the UI should
        /// re-render.
        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name(&event));
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match super::map_key(&self.app, key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                    match map_command_result(exit_code, &stderr, &context) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                    match status {
                        PermissionStatus::Granted => tracing::debug!("permissions granted"),
                        PermissionStatus::Denied => {
                            tracing::warn!("permissions denied - images cannot be opened");
                        }
                    }
                    return false;
                }
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    for action in actions {
                        self.execute_action(&action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            zforum::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        /// Translates library actions to Zellij API calls.
        #[tracing::instrument(level = "debug", skip(self))]
        fn execute_action(&self, action: &Action) {
            match action {
                Action::CloseFocus => {
                    tracing::debug!("closing plugin focus");
                    hide_self();
                }
                Action::OpenUrl { url } => {
                    tracing::debug!(command = %self.open_command, url = %url, "opening url");
                    let context =
                        BTreeMap::from([(CONTEXT_KEY.to_string(), OPEN_IMAGE.to_string())]);
                    run_command(&[self.open_command.as_str(), url.as_str()], context);
                }
            }
        }
    }

    /// Maps the result of an open command to an event; results of commands
    /// this plugin did not start are ignored.
    fn map_command_result(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<zforum::Event> {
        if context.get(CONTEXT_KEY).map(String::as_str) != Some(OPEN_IMAGE) {
            return None;
        }
        tracing::debug!(exit_code = ?exit_code, "open command finished");

        if exit_code == Some(0) {
            return None;
        }

        let stderr = String::from_utf8_lossy(stderr).trim().to_string();
        let error = if stderr.is_empty() {
            exit_code.map_or_else(
                || "command did not run".to_string(),
                |code| format!("exit code {code}"),
            )
        } else {
            stderr
        };
        Some(zforum::Event::OpenImageFailed { error })
    }

    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }
}

/// Maps a key press to an application event for the current context.
///
/// Returns `None` for keys that mean nothing where the user currently is.
fn map_key(app: &AppState, key: &KeyWithModifier) -> Option<Event> {
    tracing::debug!(bare_key = ?key.bare_key, "key event");

    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::KeyDown),
            BareKey::Char('p') => Some(Event::KeyUp),
            _ => None,
        };
    }

    if app.input_mode == InputMode::ConfirmDelete {
        return match key.bare_key {
            BareKey::Char('y' | 'Y') => Some(Event::ConfirmDelete),
            BareKey::Char('n' | 'N') | BareKey::Esc => Some(Event::CancelDelete),
            _ => None,
        };
    }

    if app.is_typing() {
        return map_typing_key(app, key);
    }

    let on_home = app.navigation.page() == Page::Home;

    Some(match key.bare_key {
        BareKey::Down | BareKey::Char('j') if on_home => Event::KeyDown,
        BareKey::Up | BareKey::Char('k') if on_home => Event::KeyUp,
        BareKey::Enter => Event::Submit,
        BareKey::Esc | BareKey::Char('b') => Event::Back,
        BareKey::Char('q') => Event::CloseFocus,
        BareKey::Char('u') => Event::Upvote,
        BareKey::Char('n') if on_home => Event::NewPost,
        BareKey::Char('/') if on_home => {
            if app.input_mode.is_search() {
                Event::FocusSearchBar
            } else {
                Event::SearchMode
            }
        }
        BareKey::Char('s') if on_home => Event::ToggleSort,
        BareKey::Char('e') if !on_home => Event::EnterEdit,
        BareKey::Char('d') if !on_home => Event::RequestDelete,
        BareKey::Char('c') if !on_home => Event::StartComment,
        BareKey::Char('o') if !on_home => Event::OpenImage,
        _ => return None,
    })
}

fn map_typing_key(app: &AppState, key: &KeyWithModifier) -> Option<Event> {
    let in_form = app.navigation.page() == Page::Create || app.navigation.is_editing();

    Some(match key.bare_key {
        BareKey::Enter => Event::Submit,
        BareKey::Esc => Event::Back,
        BareKey::Backspace => Event::Backspace,
        BareKey::Tab if in_form && key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
        BareKey::Tab if in_form => Event::NextField,
        BareKey::Down if app.input_mode == InputMode::Search(SearchFocus::Typing) => {
            Event::FocusResults
        }
        BareKey::Char(c) => Event::Char(c),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zforum::{PostFields, SortMode, Theme};

    fn key(bare: BareKey) -> KeyWithModifier {
        KeyWithModifier::new(bare)
    }

    fn home() -> AppState {
        AppState::new(Theme::default(), SortMode::Recency)
    }

    #[test]
    fn home_keys() {
        let app = home();
        assert_eq!(map_key(&app, &key(BareKey::Char('j'))), Some(Event::KeyDown));
        assert_eq!(map_key(&app, &key(BareKey::Up)), Some(Event::KeyUp));
        assert_eq!(map_key(&app, &key(BareKey::Char('n'))), Some(Event::NewPost));
        assert_eq!(map_key(&app, &key(BareKey::Char('/'))), Some(Event::SearchMode));
        assert_eq!(map_key(&app, &key(BareKey::Char('s'))), Some(Event::ToggleSort));
        assert_eq!(map_key(&app, &key(BareKey::Char('e'))), None);
        assert_eq!(map_key(&app, &key(BareKey::Char('q'))), Some(Event::CloseFocus));
    }

    #[test]
    fn ctrl_n_moves_even_while_typing() {
        let mut app = home();
        app.input_mode = InputMode::Search(SearchFocus::Typing);
        let ctrl_n = KeyWithModifier::new(BareKey::Char('n')).with_ctrl_modifier();
        assert_eq!(map_key(&app, &ctrl_n), Some(Event::KeyDown));
    }

    #[test]
    fn typing_in_the_create_form() {
        let mut app = home();
        app.navigation.request_create();

        assert_eq!(map_key(&app, &key(BareKey::Char('q'))), Some(Event::Char('q')));
        assert_eq!(map_key(&app, &key(BareKey::Tab)), Some(Event::NextField));
        assert_eq!(
            map_key(&app, &KeyWithModifier::new(BareKey::Tab).with_shift_modifier()),
            Some(Event::PrevField)
        );
        assert_eq!(map_key(&app, &key(BareKey::Esc)), Some(Event::Back));
    }

    #[test]
    fn post_page_keys_and_delete_prompt() {
        let mut app = home();
        let id = app.create_post(PostFields::new("Hello", "", "")).unwrap();
        app.open_post(id);

        assert_eq!(map_key(&app, &key(BareKey::Char('d'))), Some(Event::RequestDelete));
        assert_eq!(map_key(&app, &key(BareKey::Char('o'))), Some(Event::OpenImage));
        assert_eq!(map_key(&app, &key(BareKey::Char('j'))), None);

        app.input_mode = InputMode::ConfirmDelete;
        assert_eq!(map_key(&app, &key(BareKey::Char('y'))), Some(Event::ConfirmDelete));
        assert_eq!(map_key(&app, &key(BareKey::Char('n'))), Some(Event::CancelDelete));
        assert_eq!(map_key(&app, &key(BareKey::Char('u'))), None);
    }

    #[test]
    fn search_bar_down_moves_to_results() {
        let mut app = home();
        app.input_mode = InputMode::Search(SearchFocus::Typing);
        assert_eq!(map_key(&app, &key(BareKey::Down)), Some(Event::FocusResults));
        assert_eq!(map_key(&app, &key(BareKey::Char('j'))), Some(Event::Char('j')));
    }
}
