//! Prints themed transcript lines as ANSI text.

use owo_colors::{OwoColorize, Style as Ink};
use radar_ui::view::wrap_line;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

/// Used when stdout is not a terminal
const FALLBACK_WIDTH: usize = 100;

pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .ok()
        .map(|(width, _)| width as usize)
        .filter(|width| *width > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Translate a `ratatui` style into an `owo-colors` one
pub fn ink(style: Style) -> Ink {
    let mut ink = Ink::new();
    if let Some(Color::Rgb(r, g, b)) = style.fg {
        ink = ink.truecolor(r, g, b);
    }
    if style.add_modifier.contains(Modifier::BOLD) {
        ink = ink.bold();
    }
    if style.add_modifier.contains(Modifier::ITALIC) {
        ink = ink.italic();
    }
    if style.add_modifier.contains(Modifier::UNDERLINED) {
        ink = ink.underline();
    }
    ink
}

pub fn paint(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| (&*span.content).style(ink(span.style)).to_string()).collect()
}

pub fn print_lines(lines: &[Line<'static>], width: usize) {
    for line in lines {
        for wrapped in wrap_line(line, width) {
            println!("{}", paint(&wrapped));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_ui::Theme;
    use ratatui::text::Span;

    #[test]
    fn test_paint_keeps_text() {
        let line = Line::from(vec![Span::styled("risk", Theme::link()), Span::styled(" ahead", Theme::muted())]);
        let painted = paint(&line);
        assert!(painted.contains("risk"));
        assert!(painted.contains(" ahead"));
    }

    #[test]
    fn test_paint_truecolor() {
        let painted = paint(&Line::from(Span::styled("x", Style::default().fg(Color::Rgb(226, 120, 120)))));
        assert!(painted.contains("38;2;226;120;120"));
    }

    #[test]
    fn test_terminal_width_positive() {
        assert!(terminal_width() > 0);
    }
}
