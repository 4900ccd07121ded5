//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler only mutates [`AppState`](super::AppState). Anything that
//! has to leave the plugin, such as hiding the pane or asking the host to open
//! a URL, is returned as an [`Action`] and carried out by `main.rs`.
//!
//! # Example
//!
//! ```rust
//! use zforum::app::Action;
//!
//! let actions = vec![Action::OpenUrl { url: "https://example.com/cat.png".into() }];
//! assert_eq!(actions.len(), 1);
//! ```

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Opens a post's image URL with the configured open command.
    ///
    /// The result comes back asynchronously; failures are reported through
    /// [`Event::OpenImageFailed`](super::Event::OpenImageFailed).
    OpenUrl {
        /// URL exactly as stored on the post, trimmed.
        url: String,
    },
}
