//! Post form renderer, shared by the create page and edit mode.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FieldView, FormView};

/// Left margin of the form.
const FORM_MARGIN: usize = 2;

/// Renders every field of `form` starting at `row`.
///
/// Each field takes four lines: its label and a 3-line input box.
///
/// # Returns
///
/// The next available row position.
pub fn render_form(row: usize, form: &FormView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for field in &form.fields {
        current_row = render_field(current_row, field, theme, cols);
    }
    current_row
}

fn render_field(row: usize, field: &FieldView, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(FORM_MARGIN * 2 + 2);
    let border = if field.is_focused {
        &theme.colors.input_focus_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(FORM_MARGIN));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", field.label);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(FORM_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));

    let (text, color) = if field.value.is_empty() && !field.is_focused {
        (format!(" {}", field.placeholder), &theme.colors.text_dim)
    } else {
        let cursor = if field.is_focused { "█" } else { "" };
        (format!(" {}{cursor}", field.value), &theme.colors.text_normal)
    };
    // Long values scroll so the cursor end stays visible.
    let text = tail(&text, inner_width);
    let padding = inner_width.saturating_sub(display_width(&text));

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(FORM_MARGIN));
    print!("│");
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");

    position_cursor(row + 3, 1);
    print!("{}", " ".repeat(FORM_MARGIN));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 4
}

fn tail(text: &str, width: usize) -> String {
    let len = display_width(text);
    text.chars().skip(len.saturating_sub(width)).collect()
}
