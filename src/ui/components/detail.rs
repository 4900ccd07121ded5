//! Post detail page renderer.
//!
//! Lays the post out as a column of lines (title, metadata, image link,
//! wrapped content, comments, comment input) and prints as many as fit above
//! the footer. In edit mode the post form replaces the read-only fields.

use super::form::render_form;
use crate::ui::helpers::{display_width, position_cursor, truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

/// Left margin of the page body.
const MARGIN: usize = 2;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Title,
    Normal,
    Dim,
    Upvote,
    Accent,
    Warning,
}

/// Renders the detail page between `row` and `last_row` inclusive.
///
/// # Returns
///
/// The next available row position.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailView, theme: &Theme, cols: usize) -> usize {
    if let Some(form) = &detail.edit_form {
        return render_form(row, form, theme, cols);
    }

    let width = cols.saturating_sub(MARGIN * 2).max(1);
    let lines = layout(detail, width);

    let mut current_row = row;
    for (text, tone) in lines {
        if current_row > last_row {
            break;
        }
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(MARGIN));
        print!("{}", tone_style(tone, theme));
        let text = truncate(&text, width);
        print!("{text}");
        print!("{}", Theme::reset());
        print!("{}", " ".repeat(cols.saturating_sub(MARGIN + display_width(&text))));
        current_row += 1;
    }
    current_row
}

fn layout(detail: &DetailView, width: usize) -> Vec<(String, Tone)> {
    let mut lines = Vec::new();

    for line in wrap_text(&detail.title, width) {
        lines.push((line, Tone::Title));
    }
    lines.push((format!("Posted {}", detail.created), Tone::Dim));
    lines.push((format!("▲ {} upvotes", detail.upvotes), Tone::Upvote));
    if let Some(image) = &detail.image {
        lines.push((format!("Image: {image}  (o to open)"), Tone::Accent));
    }
    lines.push((String::new(), Tone::Normal));

    for line in wrap_text(&detail.content, width) {
        lines.push((line, Tone::Normal));
    }
    if !detail.content.is_empty() {
        lines.push((String::new(), Tone::Normal));
    }

    if detail.confirm_delete {
        lines.push(("Delete this post? (y/n)".to_string(), Tone::Warning));
        lines.push((String::new(), Tone::Normal));
    }

    lines.push((format!("Comments ({})", detail.comments.len()), Tone::Title));
    for comment in &detail.comments {
        for (i, line) in wrap_text(comment, width.saturating_sub(2)).into_iter().enumerate() {
            let bullet = if i == 0 { "• " } else { "  " };
            lines.push((format!("{bullet}{line}"), Tone::Normal));
        }
    }

    let input = if detail.comment_focused {
        (format!("> {}█", detail.comment_input), Tone::Accent)
    } else if detail.comment_input.is_empty() {
        ("Leave a comment (c)".to_string(), Tone::Dim)
    } else {
        (format!("> {}", detail.comment_input), Tone::Dim)
    };
    lines.push((String::new(), Tone::Normal));
    lines.push(input);

    lines
}

fn tone_style(tone: Tone, theme: &Theme) -> String {
    let colors = &theme.colors;
    match tone {
        Tone::Title => format!("{}{}", Theme::bold(), Theme::fg(&colors.header_fg)),
        Tone::Normal => Theme::fg(&colors.text_normal),
        Tone::Dim => Theme::fg(&colors.text_dim),
        Tone::Upvote => Theme::fg(&colors.upvote_fg),
        Tone::Accent => Theme::fg(&colors.input_focus_border),
        Tone::Warning => format!("{}{}", Theme::bold(), Theme::fg(&colors.error_fg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> DetailView {
        DetailView {
            title: "Hello".to_string(),
            created: "2024-01-01 10:00:00".to_string(),
            upvotes: 3,
            image: None,
            content: String::new(),
            comments: vec!["first".to_string(), "second".to_string()],
            comment_input: String::new(),
            comment_focused: false,
            edit_form: None,
            confirm_delete: false,
        }
    }

    fn texts(detail: &DetailView) -> Vec<String> {
        layout(detail, 40).into_iter().map(|(text, _)| text).collect()
    }

    #[test]
    fn image_line_only_when_present() {
        let mut view = detail();
        assert!(!texts(&view).iter().any(|line| line.starts_with("Image:")));

        view.image = Some("https://img/x.png".to_string());
        assert!(texts(&view).iter().any(|line| line.starts_with("Image: https://img/x.png")));
    }

    #[test]
    fn comments_keep_their_order() {
        let lines = texts(&detail());
        let first = lines.iter().position(|l| l == "• first").unwrap();
        let second = lines.iter().position(|l| l == "• second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn delete_prompt_is_shown_when_confirming() {
        let mut view = detail();
        view.confirm_delete = true;
        assert!(texts(&view).contains(&"Delete this post? (y/n)".to_string()));
    }
}
