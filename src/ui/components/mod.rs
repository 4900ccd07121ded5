//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints and the notice line
//! - [`search`]: Search input box
//! - [`table`]: Post list (TITLE, UPVOTES, COMMENTS, AGE)
//! - [`empty`]: Centered message for empty lists and missing posts
//! - [`form`]: Labelled input boxes for creating and editing posts
//! - [`detail`]: A single post with its comments
//!
//! # Layout
//!
//! Every page shares the same frame; only the body differs:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Body: list | form | detail | not found]
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod form;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, EmptyState, FormView, ListView, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::{render_footer, render_notice};
use form::render_form;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row` and returns `row + 1`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Draws header, notice, borders and footer.
///
/// Returns the first and last rows available to the page body.
fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) -> (usize, usize) {
    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.max(current_row + 3);
    let border_row = footer_row - 1;
    let notice_row = border_row - 1;

    render_notice(notice_row, vm.notice.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    (current_row, notice_row.saturating_sub(1))
}

/// Home page: optional search box, then the post table or an empty state.
pub fn render_list_page(vm: &UIViewModel, list: &ListView, theme: &Theme, cols: usize, rows: usize) {
    let (mut current_row, _) = render_frame(vm, theme, cols, rows);

    if let Some(search) = &list.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &list.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
        return;
    }

    current_row = render_table_headers(current_row, &list.sort_label, theme, cols);
    let _current_row = render_table_rows(current_row, &list.items, theme, cols);
}

/// Create page.
pub fn render_form_page(vm: &UIViewModel, form: &FormView, theme: &Theme, cols: usize, rows: usize) {
    let (first_row, _) = render_frame(vm, theme, cols, rows);
    render_form(first_row + 1, form, theme, cols);
}

/// Detail page of an existing post.
pub fn render_detail_page(vm: &UIViewModel, detail: &DetailView, theme: &Theme, cols: usize, rows: usize) {
    let (first_row, last_row) = render_frame(vm, theme, cols, rows);
    render_detail(first_row + 1, last_row, detail, theme, cols);
}

/// Placeholder for a post that no longer exists.
pub fn render_not_found_page(vm: &UIViewModel, empty: &EmptyState, theme: &Theme, cols: usize, rows: usize) {
    let (first_row, _) = render_frame(vm, theme, cols, rows);
    render_empty_state(first_row + 2, empty, theme, cols);
}
