//! Turns a structured company report into the three transcript messages
//! shown after an enterprise analysis.

use radar_core::{CompanyReport, DataSource, Message};

/// Default analysis dimensions when the caller picks none
pub const DEFAULT_FOCUS_AREAS: [&str; 5] =
    ["Basic information", "Key people", "Opportunities", "Risk alerts", "Sales advice"];

/// `Sources:` line of links, empty when there are none
pub fn format_sources(sources: &[DataSource]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let links: Vec<String> = sources.iter().map(|s| format!("[{}]({})", s.title, s.url)).collect();
    format!("\nSources: {}", links.join(" "))
}

fn profile_message(report: &CompanyReport) -> String {
    let info = &report.basic_info;
    let mut text = format!(
        "Analysis report complete\n\n**Company Profile**\n{}\n\nHeadquarters: {} | Industry: {} | Status: {}{}",
        info.overview,
        info.headquarters,
        info.industry,
        info.funding_status,
        format_sources(&info.sources)
    );

    if !report.key_people.is_empty() {
        let people: Vec<String> = report
            .key_people
            .iter()
            .map(|p| match &p.department {
                Some(department) => format!("• **[Key Person] {}** {} ({})", p.name, p.role, department),
                None => format!("• **[Key Person] {}** {}", p.name, p.role),
            })
            .collect();
        text.push_str("\n\n");
        text.push_str(&people.join("\n"));
    }
    text
}

fn opportunities_message(report: &CompanyReport) -> String {
    if report.opportunities.is_empty() {
        return "Opportunity intelligence & intervention advice\n\nNo concrete opportunities were found.".to_string();
    }

    let items: Vec<String> = report
        .opportunities
        .iter()
        .map(|o| {
            format!(
                "• [{}] **{}**: {}\n   [Intervention]: {}{}",
                o.kind.label(),
                o.title,
                o.description,
                o.intervention_strategy,
                format_sources(&o.sources)
            )
        })
        .collect();
    format!("Opportunity intelligence & intervention advice\n\n{}", items.join("\n\n"))
}

fn strategy_message(report: &CompanyReport) -> String {
    let mut text = format!("Recommended sales strategy\n{}", report.sales_strategy);
    if !report.risks.is_empty() {
        let risks: Vec<String> = report
            .risks
            .iter()
            .map(|r| {
                format!(
                    "• [{}] **[Risk Alert] {}**: {} {}",
                    r.severity.label(),
                    r.category,
                    r.description,
                    format_sources(&r.sources)
                )
                .trim_end()
                .to_string()
            })
            .collect();
        text.push_str("\n\nPotential risks\n");
        text.push_str(&risks.join("\n"));
    }
    text
}

/// Profile, opportunities, then strategy with risks
pub fn format_report(report: &CompanyReport) -> Vec<Message> {
    vec![
        Message::model(profile_message(report)),
        Message::model(opportunities_message(report)),
        Message::model(strategy_message(report)),
    ]
}
