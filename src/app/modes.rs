//! Input mode state types for the application.
//!
//! Input modes decide how a key press is interpreted. They are orthogonal to
//! the [`Page`](super::navigation::Page): the home page can be searched, the
//! detail page can be commenting or waiting on a delete confirmation.
//!
//! # Example
//!
//! ```rust
//! use zforum::app::modes::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_search());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters go into the query.
    Typing,

    /// The query is frozen; j/k move through the results.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and the footer hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Command keys: navigation, upvote, sort, and so on.
    #[default]
    Normal,

    /// Search bar visible on the home page.
    Search(SearchFocus),

    /// Typing into the comment input of the detail page.
    Comment,

    /// A y/n delete prompt is showing for the viewed post.
    ConfirmDelete,
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }
}
