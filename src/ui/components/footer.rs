//! Footer and notice line renderers.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, NoticeInfo};

/// Renders the keybinding hints, centered and dimmed.
///
/// Text wider than the terminal is truncated so the layout never wraps.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = display_width(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the one-line notice left-aligned, or a blank line when there is none.
pub fn render_notice(row: usize, notice: Option<&NoticeInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(notice) = notice else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = if notice.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.notice_fg
    };
    let text = truncate(&format!(" {}", notice.message), cols);

    print!("{}", Theme::bold());
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(display_width(&text))));
    print!("{}", Theme::reset());
    row + 1
}
