use crate::richtext::TagCategory;
use radar_core::Role;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Terminal palette for transcript output
///
/// One accent per annotation category so report markers stay
/// distinguishable at a glance.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    pub const FG: Color = Color::Rgb(198, 200, 209);

    /// User message text
    pub const USER: Color = Color::Rgb(132, 160, 198);

    pub const BLUE: Color = Color::Rgb(132, 160, 198);
    pub const CYAN: Color = Color::Rgb(137, 184, 194);
    pub const PURPLE: Color = Color::Rgb(160, 147, 199);
    pub const GREEN: Color = Color::Rgb(180, 190, 130);
    pub const YELLOW: Color = Color::Rgb(226, 164, 120);
    pub const RED: Color = Color::Rgb(226, 120, 120);

    /// Status placeholders, list numbers, link urls
    pub const MUTED: Color = Color::Rgb(107, 112, 137);

    /// Base text style for a message author
    pub fn text(role: Role) -> Style {
        match role {
            Role::User => Style::default().fg(Self::USER),
            Role::Model => Style::default().fg(Self::FG),
        }
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Interim status line
    pub fn status() -> Style {
        Style::default().fg(Self::MUTED).add_modifier(Modifier::ITALIC)
    }

    pub fn link() -> Style {
        Style::default().fg(Self::CYAN).add_modifier(Modifier::UNDERLINED)
    }

    /// Accent color for an annotation category
    pub fn tag_color(tag: TagCategory) -> Option<Color> {
        match tag {
            TagCategory::Highlight => Some(Self::BLUE),
            TagCategory::KeyPerson => Some(Self::PURPLE),
            TagCategory::Opportunity => Some(Self::GREEN),
            TagCategory::Risk => Some(Self::RED),
            TagCategory::Strategy => Some(Self::YELLOW),
            TagCategory::Neutral => None,
        }
    }

    /// Style of an annotated span
    ///
    /// Categories keep their accent in user messages but lose the bold so
    /// the author's own text does not compete with model findings.
    pub fn tag_style(tag: TagCategory, role: Role) -> Style {
        let base = Self::text(role);
        let styled = match Self::tag_color(tag) {
            Some(color) => base.fg(color),
            None => base,
        };
        match role {
            Role::Model => styled.add_modifier(Modifier::BOLD),
            Role::User => styled,
        }
    }

    /// Label span for a message author
    pub fn role_span(role: Role) -> Span<'static> {
        match role {
            Role::User => Span::styled("you", Style::default().fg(Self::USER).add_modifier(Modifier::BOLD)),
            Role::Model => Span::styled("radar", Style::default().fg(Self::GREEN).add_modifier(Modifier::BOLD)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_values() {
        assert!(matches!(Theme::FG, Color::Rgb(_, _, _)));
    }

    #[test]
    fn test_tag_colors() {
        assert_eq!(Theme::tag_color(TagCategory::Risk), Some(Theme::RED));
        assert_eq!(Theme::tag_color(TagCategory::Opportunity), Some(Theme::GREEN));
        assert_eq!(Theme::tag_color(TagCategory::Neutral), None);
    }

    #[test]
    fn test_tag_style_by_role() {
        let model = Theme::tag_style(TagCategory::Risk, Role::Model);
        assert_eq!(model.fg, Some(Theme::RED));
        assert!(model.add_modifier.contains(Modifier::BOLD));

        let user = Theme::tag_style(TagCategory::Risk, Role::User);
        assert_eq!(user.fg, Some(Theme::RED));
        assert!(!user.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_neutral_falls_back_to_role_text() {
        assert_eq!(Theme::tag_style(TagCategory::Neutral, Role::User).fg, Some(Theme::USER));
        assert_eq!(Theme::tag_style(TagCategory::Neutral, Role::Model).fg, Some(Theme::FG));
    }

    #[test]
    fn test_every_category_has_a_style() {
        for tag in TagCategory::VALUES {
            for role in [Role::User, Role::Model] {
                assert!(Theme::tag_style(*tag, role).fg.is_some());
            }
        }
    }
}
