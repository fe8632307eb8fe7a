use crate::types::HistoryCategory;
use serde::{Deserialize, Serialize};

/// Icon shown next to an agent in the catalog
///
/// Icon keys coming from configuration or stored catalogs map onto this
/// closed set; anything unknown falls back to [`AgentIcon::Briefcase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentIcon {
    Building,
    Newspaper,
    Gavel,
    #[default]
    Briefcase,
}

impl AgentIcon {
    pub const VALUES: &[AgentIcon] = &[AgentIcon::Building, AgentIcon::Newspaper, AgentIcon::Gavel, AgentIcon::Briefcase];

    /// Total mapping from an icon key to an icon
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "building" | "building2" => AgentIcon::Building,
            "newspaper" => AgentIcon::Newspaper,
            "gavel" => AgentIcon::Gavel,
            _ => AgentIcon::Briefcase,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AgentIcon::Building => "building",
            AgentIcon::Newspaper => "newspaper",
            AgentIcon::Gavel => "gavel",
            AgentIcon::Briefcase => "briefcase",
        }
    }

    /// Single-cell glyph for terminal output
    pub fn glyph(&self) -> &'static str {
        match self {
            AgentIcon::Building => "▣",
            AgentIcon::Newspaper => "▤",
            AgentIcon::Gavel => "⚖",
            AgentIcon::Briefcase => "◧",
        }
    }
}

/// An entry in the agent catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentApp {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: AgentIcon,
    pub category: HistoryCategory,
    pub placeholder: String,
    #[serde(default)]
    pub pinned: bool,
}

/// Agents available out of the box
pub fn default_agents() -> Vec<AgentApp> {
    vec![
        AgentApp {
            id: "enterprise-analyst".to_string(),
            name: "Enterprise Analyst".to_string(),
            description: "Deep company profile, opportunity intelligence and sales strategy".to_string(),
            icon: AgentIcon::Building,
            category: HistoryCategory::Monitoring,
            placeholder: "Enter the full company name to start an analysis...".to_string(),
            pinned: true,
        },
        AgentApp {
            id: "policy-analyst".to_string(),
            name: "Policy Analyst".to_string(),
            description: "Interpretation of industry policy and regulation".to_string(),
            icon: AgentIcon::Gavel,
            category: HistoryCategory::Policy,
            placeholder: "Paste a policy title or clause...".to_string(),
            pinned: true,
        },
        AgentApp {
            id: "news-digest".to_string(),
            name: "Industry News Digest".to_string(),
            description: "Summaries of recent industry news".to_string(),
            icon: AgentIcon::Newspaper,
            category: HistoryCategory::Regular,
            placeholder: "Ask about recent industry news...".to_string(),
            pinned: false,
        },
    ]
}
