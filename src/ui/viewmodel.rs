//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `compute_viewmodel` and consumed
//! by the renderer. They hold display-ready strings and flags only; nothing in
//! here knows about the store or the navigation state machine.
//!
//! # Example
//!
//! ```rust
//! use zforum::ui::viewmodel::{EmptyState, FooterInfo, HeaderInfo, Screen, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Post ".to_string() },
//!     footer: FooterInfo { keybindings: "Esc: back".to_string() },
//!     notice: None,
//!     screen: Screen::NotFound(EmptyState {
//!         message: "Post not found.".to_string(),
//!         subtitle: "It may have been deleted".to_string(),
//!     }),
//! };
//! assert!(matches!(vm.screen, Screen::NotFound(_)));
//! ```

/// Width shared by the UPVOTES, COMMENTS and AGE columns of the post table.
pub const NUMERIC_COLUMNS_WIDTH: usize = 30;

/// Narrowest title column the post table will shrink to.
pub const MIN_TITLE_WIDTH: usize = 12;

/// Width of the TITLE column for a terminal `cols` wide.
#[must_use]
pub fn title_column_width(cols: usize) -> usize {
    cols.saturating_sub(NUMERIC_COLUMNS_WIDTH).max(MIN_TITLE_WIDTH)
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (page title, counts).
    pub header: HeaderInfo,

    /// Footer information (keybindings for the current mode).
    pub footer: FooterInfo,

    /// One-line message from the last handled event, if any.
    pub notice: Option<NoticeInfo>,

    /// Page body.
    pub screen: Screen,
}

/// The body of the page, one variant per logical page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Home: the projected post list.
    List(ListView),
    /// The create form.
    Form(FormView),
    /// Detail page of an existing post.
    Detail(DetailView),
    /// Detail page whose post no longer exists.
    NotFound(EmptyState),
}

/// The home page list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Rows inside the visible window.
    pub items: Vec<DisplayItem>,

    /// Index of the selected row within `items`.
    pub selected_index: usize,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Current sort mode label ("Newest" or "Top").
    pub sort_label: String,

    /// Replaces the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single post row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, truncated to the title column.
    pub title: String,

    /// Upvote count.
    pub upvotes: u32,

    /// Number of comments.
    pub comment_count: usize,

    /// Relative age, e.g. "5m ago".
    pub age: String,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Character ranges of `title` matching the search query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// A labelled list of input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Inputs in display order: title, content, image URL.
    pub fields: Vec<FieldView>,
}

/// One input of a [`FormView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Field name shown above the input (e.g., "Image URL").
    pub label: String,
    /// Current draft text.
    pub value: String,
    /// Hint shown when `value` is empty.
    pub placeholder: String,
    /// Whether this input receives keystrokes; drawn with the focus border.
    pub is_focused: bool,
}

/// The detail page of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Post title, unwrapped.
    pub title: String,
    /// Local creation timestamp label.
    pub created: String,
    /// Upvote count.
    pub upvotes: u32,
    /// Image URL, only when the post has one.
    pub image: Option<String>,
    /// Body text; wrapped by the renderer.
    pub content: String,
    /// Comments in submission order.
    pub comments: Vec<String>,
    /// Current comment draft.
    pub comment_input: String,
    /// Whether keystrokes currently go to the comment input.
    pub comment_focused: bool,
    /// Present in edit mode; replaces the read-only fields.
    pub edit_form: Option<FormView>,
    /// Whether the delete prompt is showing.
    pub confirm_delete: bool,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "j/k: navigate  n: new  q: quit").
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No posts yet").
    pub message: String,

    /// Secondary explanatory text (e.g., "Press 'n' to write one").
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Whether the query is receiving keystrokes.
    pub is_focused: bool,
}

/// A transient status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeInfo {
    /// Text shown above the footer.
    pub message: String,
    /// Selects the error color instead of the notice color.
    pub is_error: bool,
}
