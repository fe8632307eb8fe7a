//! Domain records shared by the providers, the store and the transcript.
//!
//! `CompanyReport` and its parts deserialize from the camelCase JSON the
//! analysis service returns; every optional section defaults so a sparse
//! but well-formed answer still parses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single transcript message
///
/// `is_status_placeholder` marks interim progress text ("Drafting report...")
/// that later updates may overwrite in place. It is set by whoever produces
/// the message and never inferred from the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_status_placeholder: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into(), is_status_placeholder: false }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into(), is_status_placeholder: false }
    }

    /// Progress text shown while a request is running
    pub fn status(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into(), is_status_placeholder: true }
    }

    pub fn is_model(&self) -> bool {
        self.role == Role::Model
    }

    /// Model message with real content (not a progress placeholder)
    pub fn is_model_content(&self) -> bool {
        self.is_model() && !self.is_status_placeholder
    }
}

/// Reference backing a claim in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub overview: String,
    pub founding_date: String,
    pub headquarters: String,
    pub industry: String,
    pub funding_status: String,
    pub sources: Vec<DataSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyPerson {
    pub name: String,
    pub role: String,
    pub department: Option<String>,
    pub sources: Vec<DataSource>,
}

/// Channel through which a sales opportunity surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityKind {
    #[default]
    Tender,
    Hiring,
    Consulting,
}

impl OpportunityKind {
    pub fn label(&self) -> &'static str {
        match self {
            OpportunityKind::Tender => "Tender",
            OpportunityKind::Hiring => "Hiring",
            OpportunityKind::Consulting => "Consulting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Opportunity {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub description: String,
    pub intervention_strategy: String,
    pub sources: Vec<DataSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Risk {
    pub severity: Severity,
    pub category: String,
    pub description: String,
    pub sources: Vec<DataSource>,
}

/// Structured company analysis returned by the report collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReport {
    pub company_name: String,
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub key_people: Vec<KeyPerson>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    pub sales_strategy: String,
}

/// Which flow produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryCategory {
    #[default]
    Regular,
    Policy,
    Monitoring,
}

impl HistoryCategory {
    pub const VALUES: &[HistoryCategory] =
        &[HistoryCategory::Regular, HistoryCategory::Policy, HistoryCategory::Monitoring];

    pub fn label(&self) -> &'static str {
        match self {
            HistoryCategory::Regular => "Regular conversation",
            HistoryCategory::Policy => "Industry policy analysis",
            HistoryCategory::Monitoring => "Company opportunity monitoring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub category: HistoryCategory,
    pub query: String,
    pub date: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<CompanyReport>,
    #[serde(default)]
    pub chat_history: Vec<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Tender,
    Hiring,
    Consulting,
    Earnings,
}

impl UpdateKind {
    pub fn label(&self) -> &'static str {
        match self {
            UpdateKind::Tender => "Tender",
            UpdateKind::Hiring => "Hiring",
            UpdateKind::Consulting => "Consulting",
            UpdateKind::Earnings => "Earnings",
        }
    }
}

impl From<OpportunityKind> for UpdateKind {
    fn from(kind: OpportunityKind) -> Self {
        match kind {
            OpportunityKind::Tender => UpdateKind::Tender,
            OpportunityKind::Hiring => UpdateKind::Hiring,
            OpportunityKind::Consulting => UpdateKind::Consulting,
        }
    }
}

/// Monitoring feed entry for a followed company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub id: String,
    pub text: String,
    pub date: String,
    pub is_read: bool,
    pub kind: UpdateKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowedCompany {
    pub id: String,
    pub name: String,
    pub date_added: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub recent_updates: Vec<CompanyUpdate>,
}

impl FollowedCompany {
    pub fn unread_count(&self) -> usize {
        self.recent_updates.iter().filter(|u| !u.is_read).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Sales,
    Legal,
    Procurement,
    Management,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub industries: Vec<String>,
    /// What the user's company sells; steers opportunity advice
    pub business_capabilities: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("hi");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_status_placeholder);

        let status = Message::status("Working...");
        assert!(status.is_model());
        assert!(status.is_status_placeholder);
        assert!(!status.is_model_content());

        assert!(Message::model("Done").is_model_content());
    }

    #[test]
    fn test_message_serialization_skips_false_flag() {
        let json = serde_json::to_string(&Message::model("A")).unwrap();
        assert_eq!(json, r#"{"role":"model","text":"A"}"#);

        let parsed: Message = serde_json::from_str(r#"{"role":"user","text":"q"}"#).unwrap();
        assert_eq!(parsed, Message::user("q"));
    }

    #[test]
    fn test_company_report_from_sparse_json() {
        let json = r#"{
            "companyName": "Acme Cloud",
            "basicInfo": { "overview": "Cloud vendor", "industry": "Cloud" },
            "opportunities": [
                { "title": "Migration", "type": "hiring", "description": "d", "interventionStrategy": "s" }
            ],
            "salesStrategy": "Lead with security"
        }"#;

        let report: CompanyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.company_name, "Acme Cloud");
        assert_eq!(report.basic_info.headquarters, "");
        assert!(report.basic_info.sources.is_empty());
        assert_eq!(report.opportunities[0].kind, OpportunityKind::Hiring);
        assert!(report.risks.is_empty());
    }

    #[test]
    fn test_company_report_missing_required_field() {
        let json = r#"{ "companyName": "Acme" }"#;
        assert!(serde_json::from_str::<CompanyReport>(json).is_err());
    }

    #[test]
    fn test_unread_count() {
        let company = FollowedCompany {
            id: "1".to_string(),
            name: "Acme".to_string(),
            date_added: "2026-01-01".to_string(),
            industry: None,
            recent_updates: vec![
                CompanyUpdate {
                    id: "u1".to_string(),
                    text: "New tender".to_string(),
                    date: "2026-01-02".to_string(),
                    is_read: false,
                    kind: UpdateKind::Tender,
                },
                CompanyUpdate {
                    id: "u2".to_string(),
                    text: "Q3 results".to_string(),
                    date: "2026-01-03".to_string(),
                    is_read: true,
                    kind: UpdateKind::Earnings,
                },
            ],
        };
        assert_eq!(company.unread_count(), 1);
    }

    #[test]
    fn test_update_kind_from_opportunity() {
        assert_eq!(UpdateKind::from(OpportunityKind::Hiring), UpdateKind::Hiring);
        assert_eq!(UpdateKind::from(OpportunityKind::Consulting).label(), "Consulting");
    }
}
