//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which the plugin runtime
//! changes application state. Key presses are translated into [`Event`]s by
//! `main.rs`; the handler routes each one to the store, the navigation state
//! machine, or the search and sort settings, then re-projects the home list.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Submit`, `Back`, `NewPost`, `OpenPost`
//! - **Input**: `Char`, `Backspace`, `NextField`, `PrevField`
//! - **Search and sort**: `SearchMode`, `FocusSearchBar`, `FocusResults`,
//!   `ExitSearch`, `ToggleSort`, `SetSort`, `SetSearch`
//! - **Post actions**: `Upvote`, `EnterEdit`, `RequestDelete`, `ConfirmDelete`,
//!   `CancelDelete`, `StartComment`, `OpenImage`
//! - **System**: `OpenImageFailed`, `CloseFocus`
//!
//! `Submit` and `Back` are context dependent: what Enter or Esc means depends
//! on the page and the input mode.
//!
//! # Example
//!
//! ```rust
//! use zforum::app::{handle_event, AppState, Event};
//! use zforum::store::SortMode;
//! use zforum::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), SortMode::Recency);
//! let (should_render, actions) = handle_event(&mut state, &Event::NewPost)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), zforum::ZforumError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use super::navigation::{Page, Selection};
use super::state::Notice;
use crate::app::{Action, AppState};
use crate::domain::{PostId, Result};
use crate::store::SortMode;

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the home cursor down by one position (wraps to top).
    KeyDown,
    /// Moves the home cursor up by one position (wraps to bottom).
    KeyUp,
    /// Enter: submit a form, save an edit, add a comment, or open a post.
    Submit,
    /// Esc: cancel the current input or leave the current page.
    Back,
    /// Opens the create form.
    NewPost,
    /// Opens the detail page of a specific post.
    OpenPost(PostId),

    /// Enters search mode with typing focus and an empty query.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Switches between newest-first and most-upvoted-first.
    ToggleSort,
    /// Sets the sort mode explicitly.
    SetSort(SortMode),
    /// Replaces the search query explicitly.
    SetSearch(String),

    /// Types a character into whichever input has focus.
    Char(char),
    /// Deletes the last character of the focused input.
    Backspace,
    /// Moves form focus to the next field.
    NextField,
    /// Moves form focus to the previous field.
    PrevField,

    /// Upvotes the highlighted (Home) or viewed (detail) post.
    Upvote,
    /// Starts editing the viewed post.
    EnterEdit,
    /// Asks for delete confirmation of the viewed post.
    RequestDelete,
    /// Confirms a pending delete.
    ConfirmDelete,
    /// Dismisses a pending delete.
    CancelDelete,
    /// Focuses the comment input of the viewed post.
    StartComment,
    /// Opens the viewed post's image URL.
    OpenImage,

    /// The open command for an image exited unsuccessfully.
    OpenImageFailed {
        /// Error message describing the failure.
        error: String,
    },

    /// Hides the plugin pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A pair of "should re-render" and the side effects to run. Events that do
/// not apply in the current context return `(false, vec![])`.
///
/// # Errors
///
/// Validation failures are not returned here; they are surfaced through the
/// state's notice so the create form can stay open. The `Result` is kept for
/// failures of the host boundary.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let had_notice = state.notice.take().is_some();
    let (changed, actions) = dispatch(state, event)?;

    Ok((changed || had_notice || state.notice.is_some(), actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let page = state.navigation.page();

    match event {
        Event::KeyDown => {
            if page != Page::Home || state.input_mode == InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if page != Page::Home || state.input_mode == InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Submit => Ok((submit(state), vec![])),
        Event::Back => Ok((back(state), vec![])),
        Event::NewPost => {
            if page != Page::Home || state.is_typing() {
                return Ok((false, vec![]));
            }
            let opened = state.navigation.request_create();
            if opened {
                state.input_mode = InputMode::Normal;
            }
            Ok((opened, vec![]))
        }
        Event::OpenPost(id) => Ok((state.open_post(*id), vec![])),
        Event::SearchMode => {
            if page != Page::Home {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.set_search(String::new());
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if page != Page::Home || !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if page != Page::Home || !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                state.refresh();
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            if page != Page::Home || !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.set_search(String::new());
            Ok((true, vec![]))
        }
        Event::ToggleSort => {
            if page != Page::Home {
                return Ok((false, vec![]));
            }
            let mode = state.sort_mode.toggled();
            state.set_sort(mode);
            tracing::debug!(sort = %mode, "sort toggled");
            Ok((true, vec![]))
        }
        Event::SetSort(mode) => {
            let changed = state.sort_mode != *mode;
            state.set_sort(*mode);
            Ok((changed, vec![]))
        }
        Event::SetSearch(query) => {
            let changed = state.search_query != *query;
            state.set_search(query.clone());
            Ok((changed, vec![]))
        }
        Event::Char(c) => Ok((type_char(state, *c), vec![])),
        Event::Backspace => Ok((backspace(state), vec![])),
        Event::NextField | Event::PrevField => {
            let forward = matches!(event, Event::NextField);
            let draft = match page {
                Page::Create => Some(state.navigation.create_draft_mut()),
                Page::Viewing(_) => state.navigation.edit_draft_mut(),
                Page::Home => None,
            };
            let Some(draft) = draft else {
                return Ok((false, vec![]));
            };
            if forward {
                draft.focus_next();
            } else {
                draft.focus_prev();
            }
            Ok((true, vec![]))
        }
        Event::Upvote => {
            let target = match page {
                Page::Home if state.input_mode != InputMode::Search(SearchFocus::Typing) => {
                    state.highlighted_post().map(|post| post.id)
                }
                Page::Viewing(id) if !state.is_typing() => Some(id),
                _ => None,
            };
            let Some(id) = target else {
                return Ok((false, vec![]));
            };
            let applied = state.upvote(id);
            tracing::debug!(post_id = %id, applied, "upvote requested");
            Ok((applied, vec![]))
        }
        Event::EnterEdit => {
            if state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            Ok((state.navigation.enter_edit(&state.store), vec![]))
        }
        Event::RequestDelete => {
            if state.is_typing() || state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            if !matches!(state.selection(), Selection::Found(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::ConfirmDelete;
            Ok((true, vec![]))
        }
        Event::ConfirmDelete => {
            if state.input_mode != InputMode::ConfirmDelete {
                return Ok((false, vec![]));
            }
            let removed = state.navigation.confirm_delete(&mut state.store);
            state.restore_home_mode();
            state.refresh();
            if removed {
                state.notice = Some(Notice::info("Post deleted"));
            }
            Ok((true, vec![]))
        }
        Event::CancelDelete => {
            if state.input_mode != InputMode::ConfirmDelete {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::StartComment => {
            if state.is_typing() || state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            if !matches!(state.selection(), Selection::Found(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Comment;
            Ok((true, vec![]))
        }
        Event::OpenImage => {
            if state.is_typing() {
                return Ok((false, vec![]));
            }
            let Selection::Found(post) = state.selection() else {
                return Ok((false, vec![]));
            };
            let (id, url) = (post.id, post.image_url().map(str::to_string));
            match url {
                Some(url) => {
                    tracing::debug!(post_id = %id, url = %url, "opening image");
                    Ok((false, vec![Action::OpenUrl { url }]))
                }
                None => {
                    state.notice = Some(Notice::info("This post has no image"));
                    Ok((true, vec![]))
                }
            }
        }
        Event::OpenImageFailed { error } => {
            tracing::warn!(error = %error, "opening image failed");
            state.notice = Some(Notice::error(format!("Could not open image: {error}")));
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

fn submit(state: &mut AppState) -> bool {
    match state.navigation.page() {
        Page::Create => match state.navigation.submit_create(&mut state.store) {
            Ok(Some(id)) => {
                state.restore_home_mode();
                state.refresh();
                tracing::debug!(post_id = %id, "create form submitted");
                state.notice = Some(Notice::info("Post created"));
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::debug!(error = %err, "create form rejected");
                state.notice = Some(Notice::error(err.to_string()));
                true
            }
        },
        Page::Viewing(_) if state.navigation.is_editing() => {
            if state.navigation.save_edit(&mut state.store) {
                state.refresh();
            } else {
                state.notice = Some(Notice::error("Post not found."));
            }
            true
        }
        Page::Viewing(_) if state.input_mode == InputMode::Comment => {
            if state.navigation.submit_comment(&mut state.store) {
                state.input_mode = InputMode::Normal;
                state.refresh();
                true
            } else {
                false
            }
        }
        Page::Viewing(_) => false,
        Page::Home => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) if !state.search_query.is_empty() => {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
                true
            }
            _ => {
                let Some(id) = state.highlighted_post().map(|post| post.id) else {
                    return false;
                };
                state.open_post(id)
            }
        },
    }
}

fn back(state: &mut AppState) -> bool {
    match state.navigation.page() {
        Page::Create => {
            let cancelled = state.navigation.cancel_create();
            state.restore_home_mode();
            cancelled
        }
        Page::Viewing(_) if state.input_mode == InputMode::ConfirmDelete => {
            state.input_mode = InputMode::Normal;
            true
        }
        Page::Viewing(_) if state.navigation.is_editing() => state.navigation.cancel_edit(),
        Page::Viewing(_) if state.input_mode == InputMode::Comment => {
            state.input_mode = InputMode::Normal;
            true
        }
        Page::Viewing(_) => state.go_home(),
        Page::Home if state.input_mode.is_search() => {
            state.input_mode = InputMode::Normal;
            state.set_search(String::new());
            true
        }
        Page::Home => false,
    }
}

fn type_char(state: &mut AppState, c: char) -> bool {
    match state.navigation.page() {
        Page::Create => {
            state.navigation.create_draft_mut().push(c);
            true
        }
        Page::Viewing(_) => {
            if let Some(draft) = state.navigation.edit_draft_mut() {
                draft.push(c);
                true
            } else if state.input_mode == InputMode::Comment {
                state.navigation.comment_draft_mut().push(c);
                true
            } else {
                false
            }
        }
        Page::Home => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return false;
            }
            state.search_query.push(c);
            tracing::trace!(query = %state.search_query, char = %c, "search query updated");
            state.refresh();
            true
        }
    }
}

fn backspace(state: &mut AppState) -> bool {
    match state.navigation.page() {
        Page::Create => {
            state.navigation.create_draft_mut().pop();
            true
        }
        Page::Viewing(_) => {
            if let Some(draft) = state.navigation.edit_draft_mut() {
                draft.pop();
                true
            } else if state.input_mode == InputMode::Comment {
                state.navigation.comment_draft_mut().pop();
                true
            } else {
                false
            }
        }
        Page::Home => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return false;
            }
            state.search_query.pop();
            state.refresh();
            true
        }
    }
}
