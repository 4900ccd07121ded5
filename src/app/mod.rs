//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain/store layers.
//!
//! # Architecture
//!
//! ```text
//! Key press → Event → handle_event → Store / Navigation → refresh() → render
//!                          │
//!                          └──▶ Actions → host side effects (open URL, hide)
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode types
//! - [`navigation`]: Page state machine with create, edit and comment drafts
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod navigation;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use navigation::{EditBuffer, FormField, Navigation, Page, PostDraft, Selection};
pub use state::{AppState, Notice, NoticeKind};
