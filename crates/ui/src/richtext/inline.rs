//! Inline tokenizer for a single line of text.
//!
//! Two token kinds are recognised, left to right and without overlap:
//! `**inner**` spans and `[label](url)` links. Anything that does not form a
//! complete token is kept as literal text.

use super::fragment::Fragment;
use super::vocabulary::TagVocabulary;

const BOLD: &str = "**";

/// Accumulates fragments, merging adjacent plain text
#[derive(Default)]
struct FragmentBuf {
    fragments: Vec<Fragment>,
}

impl FragmentBuf {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Fragment::PlainText(last)) = self.fragments.last_mut() {
            last.push_str(text);
        } else {
            self.fragments.push(Fragment::plain(text));
        }
    }

    fn push(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::PlainText(text) => self.push_text(&text),
            other => self.fragments.push(other),
        }
    }
}

enum Token<'a> {
    /// Complete token and the number of bytes it consumed
    Complete(Fragment, usize),
    /// Not a token; emit this literal text and continue after it
    Literal(&'a str),
}

/// Parse one line into fragments
pub fn parse_inline(line: &str, vocabulary: &TagVocabulary) -> Vec<Fragment> {
    let mut buf = FragmentBuf::default();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];
        let Some(start) = next_token_start(rest) else {
            buf.push_text(rest);
            break;
        };

        buf.push_text(&rest[..start]);
        let candidate = &rest[start..];
        let token = if candidate.starts_with(BOLD) { bold(candidate, vocabulary) } else { link(candidate) };

        match token {
            Token::Complete(fragment, consumed) => {
                buf.push(fragment);
                pos += start + consumed;
            }
            Token::Literal(text) => {
                buf.push_text(text);
                pos += start + text.len();
            }
        }
    }

    buf.fragments
}

fn next_token_start(text: &str) -> Option<usize> {
    match (text.find(BOLD), text.find('[')) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// `text` starts with `**`; the first following `**` closes the span
fn bold<'a>(text: &'a str, vocabulary: &TagVocabulary) -> Token<'a> {
    let body = &text[BOLD.len()..];
    match body.find(BOLD) {
        None => Token::Literal(BOLD),
        Some(0) => Token::Literal(&text[..BOLD.len() * 2]),
        Some(end) => {
            let inner = &body[..end];
            Token::Complete(Fragment::span(vocabulary.classify(inner), inner), end + BOLD.len() * 2)
        }
    }
}

/// `text` starts with `[`; the first `]` closes the label and must be
/// followed by `(`, the first `)` after that closes the url
fn link(text: &str) -> Token<'_> {
    let Some(label_end) = text.find(']') else {
        return Token::Literal("[");
    };
    if !text[label_end + 1..].starts_with('(') {
        return Token::Literal("[");
    }

    let url_start = label_end + 2;
    let Some(url_len) = text[url_start..].find(')') else {
        return Token::Literal("[");
    };

    let label = &text[1..label_end];
    let url = &text[url_start..url_start + url_len];
    let consumed = url_start + url_len + 1;
    if label.trim().is_empty() || url.trim().is_empty() {
        return Token::Literal(&text[..consumed]);
    }

    Token::Complete(Fragment::link(label, url), consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::fragment::TagCategory;

    fn parse(line: &str) -> Vec<Fragment> {
        parse_inline(line, &TagVocabulary::default())
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(parse("just text"), vec![Fragment::plain("just text")]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_bold_and_link() {
        assert_eq!(
            parse("Read **[Risk Alert] churn** at [Reuters](https://reuters.com) now"),
            vec![
                Fragment::plain("Read "),
                Fragment::span(TagCategory::Risk, "[Risk Alert] churn"),
                Fragment::plain(" at "),
                Fragment::link("Reuters", "https://reuters.com"),
                Fragment::plain(" now"),
            ]
        );
    }

    #[test]
    fn test_unmatched_bold_is_literal() {
        assert_eq!(parse("a ** b"), vec![Fragment::plain("a ** b")]);
        assert_eq!(parse("**open"), vec![Fragment::plain("**open")]);
    }

    #[test]
    fn test_empty_bold_is_literal() {
        assert_eq!(parse("x****y"), vec![Fragment::plain("x****y")]);
    }

    #[test]
    fn test_first_closing_pair_wins() {
        assert_eq!(
            parse("**a** and **b**"),
            vec![
                Fragment::span(TagCategory::Neutral, "a"),
                Fragment::plain(" and "),
                Fragment::span(TagCategory::Neutral, "b"),
            ]
        );
    }

    #[test]
    fn test_link_missing_paren_is_literal() {
        assert_eq!(parse("see [label](https://x"), vec![Fragment::plain("see [label](https://x")]);
    }

    #[test]
    fn test_bracket_without_link() {
        assert_eq!(parse("[Key Point] only"), vec![Fragment::plain("[Key Point] only")]);
        assert_eq!(parse("a [b"), vec![Fragment::plain("a [b")]);
    }

    #[test]
    fn test_empty_label_or_url_is_literal() {
        assert_eq!(parse("[](https://x) [y]()"), vec![Fragment::plain("[](https://x) [y]()")]);
    }

    #[test]
    fn test_first_bracket_closes_label() {
        assert_eq!(
            parse("[a] [b](u)"),
            vec![Fragment::plain("[a] "), Fragment::link("b", "u")]
        );
    }

    #[test]
    fn test_bold_after_broken_link() {
        assert_eq!(
            parse("[x]( **[Key Point] y**"),
            vec![Fragment::plain("[x]( "), Fragment::span(TagCategory::Highlight, "[Key Point] y")]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            parse("风险：**[Risk Alert] 诉讼**。"),
            vec![
                Fragment::plain("风险："),
                Fragment::span(TagCategory::Risk, "[Risk Alert] 诉讼"),
                Fragment::plain("。"),
            ]
        );
    }
}
