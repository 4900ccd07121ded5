//! User interface rendering layer with component-based architecture.
//!
//! Turns view models into ANSI-styled output through small rendering
//! components. Themes control every color.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Page and widget renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, wrapping)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailView, DisplayItem, EmptyState, FieldView, FooterInfo, FormView, HeaderInfo, ListView,
    NoticeInfo, Screen, SearchBarInfo, UIViewModel,
};
