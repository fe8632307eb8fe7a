use radar_core::Message;

/// Labels given to the first three answers of an enterprise report
pub const REPORT_SECTION_LABELS: [&str; 3] = ["Company Profile", "Opportunity Intelligence", "Sales Strategy"];

/// Jump target for a model answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPoint {
    pub label: String,
    /// Position of the message in the transcript
    pub index: usize,
}

/// One point per model message that is not a status placeholder
pub fn nav_points(messages: &[Message], from_report: bool) -> Vec<NavPoint> {
    messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_model_content())
        .enumerate()
        .map(|(n, (index, _))| {
            let label = match REPORT_SECTION_LABELS.get(n) {
                Some(section) if from_report => section.to_string(),
                _ => format!("Reply #{}", n + 1),
            };
            NavPoint { label, index }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_skips_placeholders_and_user() {
        let messages =
            vec![Message::status("Loading..."), Message::model("A"), Message::user("q"), Message::model("B")];
        let points = nav_points(&messages, false);
        assert_eq!(
            points,
            vec![
                NavPoint { label: "Reply #1".to_string(), index: 1 },
                NavPoint { label: "Reply #2".to_string(), index: 3 },
            ]
        );
    }

    #[test]
    fn test_nav_report_labels() {
        let messages = vec![
            Message::model("profile"),
            Message::model("opportunities"),
            Message::model("strategy"),
            Message::user("and pricing?"),
            Message::model("answer"),
        ];
        let labels: Vec<String> = nav_points(&messages, true).into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["Company Profile", "Opportunity Intelligence", "Sales Strategy", "Reply #4"]);
    }

    #[test]
    fn test_nav_text_with_ellipsis_is_not_a_placeholder() {
        let messages = vec![Message::model("Report ready... see below")];
        assert_eq!(nav_points(&messages, false).len(), 1);
    }

    #[test]
    fn test_nav_empty() {
        assert!(nav_points(&[], true).is_empty());
    }
}
