//! Rich-text rendering for transcript messages.
//!
//! The markup is deliberately small: paragraphs separated by a blank line,
//! bullet or numbered list blocks, `**...**` spans classified by the marker
//! they contain, and `[label](url)` links. Malformed markup never fails; it
//! is shown as the literal text it was written as.

mod blocks;
mod fragment;
mod inline;
mod vocabulary;

pub use blocks::strip_list_marker;
pub use fragment::{Fragment, TagCategory, plain_text};
pub use inline::parse_inline;
pub use vocabulary::TagVocabulary;

use radar_core::Role;

const PARAGRAPH_BREAK: &str = "\n\n";
const LINE_BREAK: &str = "\n";

/// Stateless renderer carrying the marker vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renderer {
    vocabulary: TagVocabulary,
}

impl Renderer {
    pub fn new(vocabulary: TagVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }

    /// Parse `text` into display fragments.
    ///
    /// `role` only affects presentation; the same text parses the same way
    /// for user and model messages.
    pub fn render(&self, text: &str, _role: Role) -> Vec<Fragment> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut fragments = Vec::new();
        for (i, block) in text.split(PARAGRAPH_BREAK).enumerate() {
            if i > 0 {
                fragments.push(Fragment::plain(PARAGRAPH_BREAK));
            }
            self.render_block(block, &mut fragments);
        }
        fragments
    }

    fn render_block(&self, block: &str, out: &mut Vec<Fragment>) {
        if let Some(items) = blocks::list_items(block) {
            out.extend(items.into_iter().enumerate().map(|(i, body)| Fragment::ListItem {
                index: i + 1,
                fragments: parse_inline(body, &self.vocabulary),
            }));
            return;
        }

        for (i, line) in block.split(LINE_BREAK).enumerate() {
            if i > 0 {
                out.push(Fragment::plain(LINE_BREAK));
            }
            out.extend(parse_inline(line, &self.vocabulary));
        }
    }
}

/// Render with the default marker vocabulary
pub fn render(text: &str, role: Role) -> Vec<Fragment> {
    Renderer::default().render(text, role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(render("", Role::Model).is_empty());
    }

    #[test]
    fn test_round_trip_plain_bold_link() {
        let source = "Overview of **[Key Update] Acme** growth.\nSee [filing](https://sec.gov/acme).\n\nSecond paragraph.";
        let fragments = render(source, Role::Model);
        assert_eq!(
            plain_text(&fragments),
            "Overview of [Key Update] Acme growth.\nSee filing.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_breaks_are_plain_text() {
        assert_eq!(
            render("a\nb\n\nc", Role::Model),
            vec![
                Fragment::plain("a"),
                Fragment::plain("\n"),
                Fragment::plain("b"),
                Fragment::plain("\n\n"),
                Fragment::plain("c"),
            ]
        );
    }

    #[test]
    fn test_malformed_markup_is_literal() {
        let source = "Unmatched ** here and [label]( dangling";
        assert_eq!(render(source, Role::Model), vec![Fragment::plain(source)]);
    }

    #[test]
    fn test_bullet_list() {
        let fragments = render("• one\n• **[Opportunity] two**\n• three", Role::Model);
        assert_eq!(fragments.len(), 3);
        let indices: Vec<usize> = fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::ListItem { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(
            fragments[1],
            Fragment::ListItem { index: 2, fragments: vec![Fragment::span(TagCategory::Opportunity, "[Opportunity] two")] }
        );
    }

    #[test]
    fn test_numbered_list_ignores_source_numerals() {
        let fragments = render("7. a\n9. b", Role::User);
        assert_eq!(
            fragments,
            vec![
                Fragment::ListItem { index: 1, fragments: vec![Fragment::plain("a")] },
                Fragment::ListItem { index: 2, fragments: vec![Fragment::plain("b")] },
            ]
        );
    }

    #[test]
    fn test_mixed_block_is_not_a_list() {
        let fragments = render("Risks\n• churn\n• debt", Role::Model);
        assert!(fragments.iter().all(|f| !matches!(f, Fragment::ListItem { .. })));
        assert_eq!(plain_text(&fragments), "Risks\n• churn\n• debt");
    }

    #[test]
    fn test_single_bullet_line_is_not_a_list() {
        assert_eq!(render("• alone", Role::Model), vec![Fragment::plain("• alone")]);
    }

    #[test]
    fn test_list_between_paragraphs() {
        let fragments = render("Intro\n\n- a\n- b\n\nOutro", Role::Model);
        assert_eq!(fragments[0], Fragment::plain("Intro"));
        assert_eq!(fragments[1], Fragment::plain("\n\n"));
        assert!(matches!(fragments[2], Fragment::ListItem { index: 1, .. }));
        assert!(matches!(fragments[3], Fragment::ListItem { index: 2, .. }));
        assert_eq!(fragments[4], Fragment::plain("\n\n"));
        assert_eq!(fragments[5], Fragment::plain("Outro"));
    }

    #[test]
    fn test_role_does_not_change_parsing() {
        let source = "**[Risk Alert] x** [a](b)";
        assert_eq!(render(source, Role::User), render(source, Role::Model));
    }

    #[test]
    fn test_custom_vocabulary() {
        let renderer = Renderer::new(TagVocabulary::empty().with_marker("[风险预警]", TagCategory::Risk));
        assert_eq!(
            renderer.render("**[风险预警] 诉讼**", Role::Model),
            vec![Fragment::span(TagCategory::Risk, "[风险预警] 诉讼")]
        );
    }
}
