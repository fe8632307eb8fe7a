/// Semantic class of an annotated span, chosen by the marker it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagCategory {
    Highlight,
    KeyPerson,
    Opportunity,
    Risk,
    Strategy,
    #[default]
    Neutral,
}

impl TagCategory {
    pub const VALUES: &[TagCategory] = &[
        TagCategory::Highlight,
        TagCategory::KeyPerson,
        TagCategory::Opportunity,
        TagCategory::Risk,
        TagCategory::Strategy,
        TagCategory::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Highlight => "highlight",
            TagCategory::KeyPerson => "key-person",
            TagCategory::Opportunity => "opportunity",
            TagCategory::Risk => "risk",
            TagCategory::Strategy => "strategy",
            TagCategory::Neutral => "neutral",
        }
    }
}

/// A display fragment produced by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    PlainText(String),
    /// Content of a `**...**` span
    AnnotatedSpan { tag: TagCategory, inner: String },
    Link { label: String, url: String },
    /// One line of a list block; `index` is 1-based
    ListItem { index: usize, fragments: Vec<Fragment> },
}

impl Fragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Fragment::PlainText(text.into())
    }

    pub fn span(tag: TagCategory, inner: impl Into<String>) -> Self {
        Fragment::AnnotatedSpan { tag, inner: inner.into() }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Fragment::Link { label: label.into(), url: url.into() }
    }

    /// Visible text with markup syntax removed
    pub fn text(&self) -> String {
        match self {
            Fragment::PlainText(text) => text.clone(),
            Fragment::AnnotatedSpan { inner, .. } => inner.clone(),
            Fragment::Link { label, .. } => label.clone(),
            Fragment::ListItem { fragments, .. } => plain_text(fragments),
        }
    }
}

/// Concatenated visible text of a fragment sequence
pub fn plain_text(fragments: &[Fragment]) -> String {
    fragments.iter().map(Fragment::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_text() {
        assert_eq!(Fragment::plain("a").text(), "a");
        assert_eq!(Fragment::span(TagCategory::Risk, "b").text(), "b");
        assert_eq!(Fragment::link("c", "https://c.example").text(), "c");

        let item = Fragment::ListItem { index: 1, fragments: vec![Fragment::plain("x "), Fragment::link("y", "u")] };
        assert_eq!(item.text(), "x y");
    }

    #[test]
    fn test_default_category_is_neutral() {
        assert_eq!(TagCategory::default(), TagCategory::Neutral);
        assert_eq!(TagCategory::VALUES.len(), 6);
    }
}
