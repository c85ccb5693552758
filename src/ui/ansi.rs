use crossterm::style::{Attribute, Color as TermColor, ContentStyle, StyledContent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Line,
};

pub fn to_terminal_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Indexed(i) => TermColor::AnsiValue(i),
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
    }
}

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.map(to_terminal_color);
    content.background_color = style.bg.map(to_terminal_color);
    if style.add_modifier.contains(Modifier::BOLD) {
        content.attributes.set(Attribute::Bold);
    }
    if style.add_modifier.contains(Modifier::UNDERLINED) {
        content.attributes.set(Attribute::Underlined);
    }
    content
}

/// Flattens styled lines into escape-coded text for printing outside a
/// full-screen terminal session.
pub fn lines_to_ansi(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| StyledContent::new(content_style(span.style), &*span.content).to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
