//! Table component renderer.
//!
//! Renders the home page post list as a four-column table: TITLE, UPVOTES,
//! COMMENTS and AGE. The active sort mode is shown next to the TITLE heading.

use crate::ui::helpers::{self, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{title_column_width, DisplayItem};

/// Width of each numeric column, including its leading gap.
const COLUMN_WIDTH: usize = 10;

/// Renders the column headings at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, sort_label: &str, theme: &Theme, cols: usize) -> usize {
    let title_width = title_column_width(cols);
    let title_heading = format!("TITLE · {sort_label}");

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<title_width$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
        title_heading, "UPVOTES", "COMMENTS", "AGE"
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row`.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one post row.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Search match highlights (unless selected)
/// 3. Normal text color, upvotes in `upvote_fg`
///
/// The row is padded to the full width so the selection background is solid.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let title_width = title_column_width(cols);
    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(title_width.saturating_sub(display_width(&item.title))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.upvote_fg));
    }
    print!("{:>COLUMN_WIDTH$}", format!("▲ {}", item.upvotes));

    print!("{}", Theme::fg(base_fg));
    print!("{:>COLUMN_WIDTH$}", item.comment_count);
    print!("{:>COLUMN_WIDTH$}", item.age);

    let line_len = title_width + COLUMN_WIDTH * 3;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
