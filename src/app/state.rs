//! Application state management and view model computation.
//!
//! [`AppState`] is the controller that owns the [`PostStore`] and the
//! [`Navigation`] state machine, together with the home page search and sort
//! settings. It is the only place where the visible list is derived, and it
//! re-derives it after every accepted mutation through [`AppState::refresh`].
//!
//! # State Components
//!
//! - **Store**: all posts, the single source of truth
//! - **Navigation**: current page plus create, edit and comment drafts
//! - **Projected**: the filtered, sorted copy of the store shown on Home
//! - **Selection**: cursor position within the projected list
//! - **Input Mode**: how keystrokes are interpreted
//! - **Notice**: a one-shot message from the last handled event
//!
//! # Example
//!
//! ```rust
//! use zforum::app::AppState;
//! use zforum::domain::PostFields;
//! use zforum::store::SortMode;
//! use zforum::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), SortMode::Recency);
//! state.create_post(PostFields::new("Hello", "", ""))?;
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.title, " My Forum (1) ");
//! # Ok::<(), zforum::ZforumError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use super::navigation::{FormField, Navigation, Page, PostDraft, Selection};
use crate::domain::{Post, PostFields, PostId, Result};
use crate::store::{highlight_range, project, PostStore, SortMode};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    title_column_width, DetailView, DisplayItem, EmptyState, FieldView, FooterInfo, FormView,
    HeaderInfo, ListView, NoticeInfo, Screen, SearchBarInfo, UIViewModel,
};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message produced by the last event, shown until the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Picks the color the footer uses.
    pub kind: NoticeKind,
    /// One line of text.
    pub message: String,
}

impl Notice {
    /// An informational notice, e.g. "Post created".
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    /// An error notice, e.g. a validation failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input. Fields are public
/// for reading; mutations should go through the methods so that the projected
/// list stays in sync with the store.
#[derive(Debug, Clone)]
pub struct AppState {
    /// All posts.
    pub store: PostStore,

    /// Current page and uncommitted input.
    pub navigation: Navigation,

    /// Case-insensitive title filter for the home list.
    pub search_query: String,

    /// Ordering of the home list.
    pub sort_mode: SortMode,

    /// Posts visible on Home, recomputed by `refresh()`.
    pub projected: Vec<Post>,

    /// Zero-based index of the cursor within `projected`.
    ///
    /// Clamped by `refresh()`. Wraps around during navigation.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Message to display until the next event.
    pub notice: Option<Notice>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an empty forum on the home page.
    #[must_use]
    pub fn new(theme: Theme, sort_mode: SortMode) -> Self {
        Self {
            store: PostStore::new(),
            navigation: Navigation::new(),
            search_query: String::new(),
            sort_mode,
            projected: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            notice: None,
            theme,
        }
    }

    /// Re-derives the visible list from the store and clamps the cursor.
    ///
    /// Must run after every store mutation and every change of the search
    /// query or sort mode.
    pub fn refresh(&mut self) {
        let _span = tracing::debug_span!("refresh",
            total_posts = self.store.len(),
            query_len = self.search_query.len(),
            sort = %self.sort_mode
        )
        .entered();

        self.projected = project(self.store.posts(), &self.search_query, self.sort_mode);

        if self.projected.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.projected.len() - 1);
        }

        tracing::debug!(visible = self.projected.len(), "projection refreshed");
    }

    /// Moves the cursor down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.projected.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.projected.len();
    }

    /// Moves the cursor up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.projected.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.projected.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The post under the cursor on Home.
    #[must_use]
    pub fn highlighted_post(&self) -> Option<&Post> {
        self.projected.get(self.selected_index)
    }

    /// The post on the detail page, or the not-found marker.
    #[must_use]
    pub fn selection(&self) -> Selection<'_> {
        self.navigation.selected(&self.store)
    }

    /// Returns `true` while keystrokes are routed to a text input.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.navigation.page() == Page::Create
            || self.navigation.is_editing()
            || matches!(
                self.input_mode,
                InputMode::Search(SearchFocus::Typing) | InputMode::Comment
            )
    }

    /// Replaces the search query and re-projects.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.refresh();
    }

    /// Changes the sort mode and re-projects.
    pub fn set_sort(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.refresh();
    }

    /// Creates a post directly, bypassing the create form.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is blank.
    pub fn create_post(&mut self, fields: PostFields) -> Result<PostId> {
        let id = self.store.create(fields)?;
        self.refresh();
        Ok(id)
    }

    /// Upvotes `id` and re-projects.
    ///
    /// # Returns
    ///
    /// `false` when the post does not exist.
    pub fn upvote(&mut self, id: PostId) -> bool {
        let applied = self.store.upvote(id);
        self.refresh();
        applied
    }

    /// Appends a comment to `id` and re-projects. Blank text is ignored.
    pub fn add_comment(&mut self, id: PostId, text: &str) -> bool {
        let applied = self.store.add_comment(id, text);
        self.refresh();
        applied
    }

    /// Replaces the fields of `id` and re-projects.
    pub fn edit_post(&mut self, id: PostId, fields: PostFields) -> bool {
        let applied = self.store.edit(id, fields);
        self.refresh();
        applied
    }

    /// Deletes `id` and re-projects. A detail page showing it turns into
    /// the not-found page.
    pub fn delete_post(&mut self, id: PostId) -> bool {
        let applied = self.store.delete(id);
        self.refresh();
        applied
    }

    /// Opens the detail page of `id` from Home.
    ///
    /// Returns `false` when not on Home or when the post does not exist.
    pub fn open_post(&mut self, id: PostId) -> bool {
        let Some(post) = self.store.get(id) else {
            return false;
        };
        let opened = self.navigation.select(post);
        if opened {
            self.input_mode = InputMode::Normal;
        }
        opened
    }

    /// Returns to Home from the detail page.
    ///
    /// An active query puts the list back into search navigation so the
    /// filter stays visible.
    pub fn go_home(&mut self) -> bool {
        if !self.navigation.back() {
            return false;
        }
        self.restore_home_mode();
        self.refresh();
        true
    }

    pub(crate) fn restore_home_mode(&mut self) {
        self.input_mode = if self.search_query.is_empty() {
            InputMode::Normal
        } else {
            InputMode::Search(SearchFocus::Navigating)
        };
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome (header, footer, search)
    /// 2. Center window around selected index
    /// 3. Adjust window if near the end to keep it full
    /// 4. Compute relative selection index within visible window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let screen = match self.navigation.page() {
            Page::Home => Screen::List(self.compute_list(rows, cols)),
            Page::Create => Screen::Form(Self::compute_form(self.navigation.create_draft())),
            Page::Viewing(_) => match self.selection() {
                Selection::Found(post) => Screen::Detail(self.compute_detail(post)),
                Selection::NotFound(_) | Selection::None => Screen::NotFound(EmptyState {
                    message: "Post not found.".to_string(),
                    subtitle: "Press Esc to go back".to_string(),
                }),
            },
        };

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            notice: self.notice.as_ref().map(|notice| NoticeInfo {
                message: notice.message.clone(),
                is_error: notice.kind == NoticeKind::Error,
            }),
            screen,
        }
    }

    fn compute_list(&self, rows: usize, cols: usize) -> ListView {
        let search_bar = match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                is_focused: focus == SearchFocus::Typing,
            }),
            _ => None,
        };

        let empty_state = if self.store.is_empty() {
            Some(EmptyState {
                message: "No posts yet".to_string(),
                subtitle: "Press 'n' to write the first one".to_string(),
            })
        } else if self.projected.is_empty() {
            Some(EmptyState {
                message: "No posts match your search".to_string(),
                subtitle: "Press Esc to clear the query".to_string(),
            })
        } else {
            None
        };

        if empty_state.is_some() {
            return ListView {
                items: vec![],
                selected_index: 0,
                search_bar,
                sort_label: self.sort_mode.label().to_string(),
                empty_state,
            };
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.projected.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.projected.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let title_width = title_column_width(cols);

        let items = self.projected[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, post)| {
                self.compute_display_item(post, visible_start + relative_idx, title_width)
            })
            .collect();

        ListView {
            items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            search_bar,
            sort_label: self.sort_mode.label().to_string(),
            empty_state: None,
        }
    }

    fn compute_display_item(&self, post: &Post, absolute_idx: usize, title_width: usize) -> DisplayItem {
        let title_len = post.title.chars().count();
        let (title, visible_chars) = if title_len > title_width {
            let keep = title_width.saturating_sub(3);
            let truncated: String = post.title.chars().take(keep).collect();
            (format!("{truncated}..."), keep)
        } else {
            (post.title.clone(), title_len)
        };

        let highlight_ranges = highlight_range(&post.title, &self.search_query)
            .filter(|(start, _)| *start < visible_chars)
            .map(|(start, end)| vec![(start, end.min(visible_chars))])
            .unwrap_or_default();

        DisplayItem {
            title,
            upvotes: post.upvotes,
            comment_count: post.comments.len(),
            age: post.time_ago(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_form(draft: &PostDraft) -> FormView {
        let fields = FormField::ALL
            .iter()
            .map(|&field| FieldView {
                label: field.label().to_string(),
                value: draft.value(field).to_string(),
                placeholder: match field {
                    FormField::Title => "Required",
                    FormField::Content => "Optional",
                    FormField::Image => "Optional image URL",
                }
                .to_string(),
                is_focused: draft.focus == field,
            })
            .collect();

        FormView { fields }
    }

    fn compute_detail(&self, post: &Post) -> DetailView {
        let buffer = self.navigation.edit_buffer();
        let edit_form = buffer.edit_mode.then(|| Self::compute_form(&buffer.draft));

        DetailView {
            title: post.title.clone(),
            created: post.created_label(),
            upvotes: post.upvotes,
            image: post.image_url().map(str::to_string),
            content: post.content.clone(),
            comments: post.comments.clone(),
            comment_input: self.navigation.comment_draft().to_string(),
            comment_focused: self.input_mode == InputMode::Comment,
            edit_form,
            confirm_delete: self.input_mode == InputMode::ConfirmDelete,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.navigation.page() {
            Page::Home => format!(" My Forum ({}) ", self.projected.len()),
            Page::Create => " New Post ".to_string(),
            Page::Viewing(id) if self.navigation.is_editing() => format!(" Editing Post #{id} "),
            Page::Viewing(id) => format!(" Post #{id} "),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let page = self.navigation.page();
        let keybindings = match (page, self.input_mode) {
            (Page::Create, _) => "Tab/Shift+Tab: next/prev field  Enter: post  Esc: cancel",
            (Page::Viewing(_), _) if self.navigation.is_editing() => {
                "Tab/Shift+Tab: next/prev field  Enter: save  Esc: cancel"
            }
            (Page::Viewing(_), InputMode::ConfirmDelete) => "Delete this post? y: yes  n/Esc: no",
            (Page::Viewing(_), InputMode::Comment) => "Enter: add comment  Esc: stop typing",
            (Page::Viewing(_), _) if matches!(self.selection(), Selection::NotFound(_)) => {
                "Esc/b: back  q: quit"
            }
            (Page::Viewing(_), _) => {
                "u: upvote  c: comment  e: edit  d: delete  o: open image  Esc/b: back  q: quit"
            }
            (Page::Home, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (Page::Home, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: open  u: upvote"
            }
            (Page::Home, _) => {
                "j/k: navigate  Enter: open  n: new  /: search  s: sort  u: upvote  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for the post table after header, borders, column headers,
    /// notice line and footer, plus the search box when it is showing.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Search(_) => total_rows.saturating_sub(10),
            _ => total_rows.saturating_sub(7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(titles: &[&str]) -> AppState {
        let mut state = AppState::new(Theme::default(), SortMode::Recency);
        for title in titles {
            state.create_post(PostFields::new(*title, "", "")).unwrap();
        }
        state
    }

    fn list(vm: &UIViewModel) -> &ListView {
        match &vm.screen {
            Screen::List(list) => list,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn mutations_refresh_the_projection() {
        let mut state = state_with(&["a", "b"]);
        assert_eq!(state.projected.len(), 2);

        let id = state.projected[0].id;
        state.upvote(id);
        assert_eq!(state.projected[0].upvotes, 1);

        state.delete_post(id);
        assert_eq!(state.projected.len(), 1);
    }

    #[test]
    fn cursor_is_clamped_after_shrinking() {
        let mut state = state_with(&["a", "b", "c"]);
        state.selected_index = 2;
        state.set_search("c");
        assert_eq!(state.projected.len(), 1);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = state_with(&["a", "b"]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn empty_store_shows_empty_state() {
        let state = state_with(&[]);
        let vm = state.compute_viewmodel(24, 80);
        let list = list(&vm);
        assert!(list.items.is_empty());
        assert_eq!(list.empty_state.as_ref().unwrap().message, "No posts yet");
    }

    #[test]
    fn search_highlights_title_match() {
        let mut state = state_with(&["Rust tips", "Go tips"]);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.set_search("RUST");

        let vm = state.compute_viewmodel(24, 80);
        let list = list(&vm);
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].highlight_ranges, vec![(0, 4)]);
        assert!(list.search_bar.as_ref().unwrap().is_focused);
    }

    #[test]
    fn window_follows_the_cursor() {
        let titles: Vec<String> = (0..30).map(|i| format!("post {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.selected_index = 29;

        let vm = state.compute_viewmodel(17, 80);
        let list = list(&vm);
        assert_eq!(list.items.len(), 10);
        assert!(list.items[list.selected_index].is_selected);
        assert_eq!(list.items.last().unwrap().title, "post 0");
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "x".repeat(100);
        let state = state_with(&[long.as_str()]);
        let vm = state.compute_viewmodel(24, 50);
        let title = &list(&vm).items[0].title;
        assert_eq!(title.chars().count(), title_column_width(50));
        assert!(title.ends_with("..."));
    }

    #[test]
    fn deleted_selection_renders_not_found() {
        let mut state = state_with(&["gone"]);
        let id = state.projected[0].id;
        assert!(state.open_post(id));
        state.delete_post(id);

        let vm = state.compute_viewmodel(24, 80);
        match vm.screen {
            Screen::NotFound(empty) => assert_eq!(empty.message, "Post not found."),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn go_home_restores_search_navigation() {
        let mut state = state_with(&["alpha", "beta"]);
        state.set_search("al");
        let id = state.projected[0].id;
        state.open_post(id);
        assert_eq!(state.input_mode, InputMode::Normal);

        assert!(state.go_home());
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
    }
}
