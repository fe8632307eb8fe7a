//! Styled terminal lines for transcript messages.

use crate::richtext::{Fragment, Renderer};
use crate::theme::Theme;
use crate::transcript::NavPoint;
use radar_core::{Message, Role};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Converts messages into `ratatui` lines with the theme applied
#[derive(Debug, Clone, Default)]
pub struct TranscriptView {
    renderer: Renderer,
}

impl TranscriptView {
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }

    /// Header line plus body for one message
    pub fn message_lines(&self, index: usize, message: &Message) -> Vec<Line<'static>> {
        let header = Line::from(vec![
            Span::styled(format!("[{}] ", index), Theme::muted()),
            Theme::role_span(message.role),
        ]);

        if message.is_status_placeholder {
            return vec![header, Line::from(Span::styled(format!("… {}", message.text), Theme::status()))];
        }

        let fragments = self.renderer.render(&message.text, message.role);
        let mut lines = vec![header];
        lines.extend(fragments_to_lines(&fragments, message.role));
        lines
    }

    /// Every message separated by a blank line
    pub fn transcript_lines(&self, messages: &[Message]) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (index, message) in messages.iter().enumerate() {
            if index > 0 {
                lines.push(Line::default());
            }
            lines.extend(self.message_lines(index, message));
        }
        lines
    }
}

/// One line listing the nav points, e.g. `[0] Company Profile · [1] ...`
pub fn nav_line(points: &[NavPoint]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Theme::muted()));
        }
        spans.push(Span::styled(format!("[{}] ", point.index), Theme::muted()));
        spans.push(Span::styled(point.label.clone(), Theme::text(Role::Model)));
    }
    Line::from(spans)
}

fn inline_spans(fragment: &Fragment, role: Role, out: &mut Vec<Span<'static>>) {
    match fragment {
        Fragment::PlainText(text) => out.push(Span::styled(text.clone(), Theme::text(role))),
        Fragment::AnnotatedSpan { tag, inner } => out.push(Span::styled(inner.clone(), Theme::tag_style(*tag, role))),
        Fragment::Link { label, url } => {
            out.push(Span::styled(label.clone(), Theme::link()));
            out.push(Span::styled(format!(" <{}>", url), Theme::muted()));
        }
        Fragment::ListItem { fragments, .. } => {
            for inner in fragments {
                inline_spans(inner, role, out);
            }
        }
    }
}

/// Lay fragments out as lines
///
/// Newlines inside plain text end the current line; list items always sit
/// on their own line behind an `n. ` prefix.
pub fn fragments_to_lines(fragments: &[Fragment], role: Role) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    // A list item closes its own line, so the break right after it is absorbed
    let mut open = true;

    for fragment in fragments {
        match fragment {
            Fragment::PlainText(text) => {
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        if open {
                            lines.push(Line::from(std::mem::take(&mut current)));
                        }
                        open = true;
                    }
                    if !part.is_empty() {
                        current.push(Span::styled(part.to_string(), Theme::text(role)));
                        open = true;
                    }
                }
            }
            Fragment::ListItem { index, .. } => {
                if !current.is_empty() {
                    lines.push(Line::from(std::mem::take(&mut current)));
                }
                let mut spans = vec![Span::styled(format!("{}. ", index), Theme::muted())];
                inline_spans(fragment, role, &mut spans);
                lines.push(Line::from(spans));
                open = false;
            }
            other => {
                inline_spans(other, role, &mut current);
                open = true;
            }
        }
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// Wrap a styled line to `width` display columns, keeping span styles
pub fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line.clone()];
    }

    let mut out = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in &line.spans {
        let mut chunk = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && used > 0 {
                flush_chunk(&mut current, &mut chunk, span.style);
                out.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            chunk.push(ch);
            used += w;
        }
        flush_chunk(&mut current, &mut chunk, span.style);
    }

    if !current.is_empty() || out.is_empty() {
        out.push(Line::from(current));
    }
    out
}

fn flush_chunk(current: &mut Vec<Span<'static>>, chunk: &mut String, style: Style) {
    if !chunk.is_empty() {
        current.push(Span::styled(std::mem::take(chunk), style));
    }
}
