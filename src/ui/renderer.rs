//! Top-level rendering coordinator.
//!
//! Computes the view model from `AppState` and hands its screen to the
//! matching page renderer.
//!
//! # Example
//!
//! ```rust
//! use zforum::app::AppState;
//! use zforum::store::SortMode;
//! use zforum::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::default(), SortMode::Recency);
//! render(&state, 24, 80); // Renders to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Screen, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output with `print!`. Does not clear the screen.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.screen {
        Screen::List(list) => components::render_list_page(vm, list, theme, cols, rows),
        Screen::Form(form) => components::render_form_page(vm, form, theme, cols, rows),
        Screen::Detail(detail) => components::render_detail_page(vm, detail, theme, cols, rows),
        Screen::NotFound(empty) => components::render_not_found_page(vm, empty, theme, cols, rows),
    }
}
