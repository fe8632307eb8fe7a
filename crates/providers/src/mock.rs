use crate::Analyst;
use radar_core::{
    AnalysisError, BasicInfo, ChatError, CompanyReport, DataSource, Error, KeyPerson, Message, Opportunity,
    OpportunityKind, Result, Risk, Severity,
};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Scripted chat outcome
#[derive(Debug, Clone, PartialEq)]
pub enum MockChat {
    Reply(String),
    Error(ChatError),
}

/// Which call a scripted error applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockCall {
    Report,
    Chat,
}

/// Mock response entries from TOML file
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MockResponse {
    Report { report: CompanyReport },
    Reply { text: String },
    Error { call: MockCall, message: String },
}

#[derive(Debug, Deserialize)]
struct MockConfig {
    responses: Vec<MockResponse>,
}

/// Arguments of a recorded `generate_report` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCall {
    pub subject: String,
    pub focus: Vec<String>,
    pub capabilities: String,
}

/// Arguments of a recorded `chat` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCall {
    pub history: Vec<Message>,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Default)]
struct MockState {
    reports: VecDeque<std::result::Result<CompanyReport, AnalysisError>>,
    chats: VecDeque<MockChat>,
    report_calls: Vec<ReportCall>,
    chat_calls: Vec<ChatCall>,
}

/// Analyst with scripted answers for tests and offline runs
///
/// Queued answers are handed out in order. Once a queue is empty, reports
/// fall back to [`sample_report`] for the requested subject and chat falls
/// back to a canned reply, so an unscripted mock still drives a full
/// session.
#[derive(Debug, Default)]
pub struct MockAnalyst {
    state: Mutex<MockState>,
    latency: Option<Duration>,
}

impl MockAnalyst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `[[responses]]` from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Provider(format!("Failed to read mock responses file {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MockConfig =
            toml::from_str(content).map_err(|e| Error::Parse(format!("Failed to parse mock responses: {}", e)))?;

        let mock = config.responses.into_iter().fold(Self::new(), |mock, response| match response {
            MockResponse::Report { report } => mock.with_report(Ok(report)),
            MockResponse::Reply { text } => mock.with_chat(MockChat::Reply(text)),
            MockResponse::Error { call: MockCall::Report, message } => {
                mock.with_report(Err(AnalysisError::Network(message)))
            }
            MockResponse::Error { call: MockCall::Chat, message } => {
                mock.with_chat(MockChat::Error(ChatError::Network(message)))
            }
        });
        Ok(mock)
    }

    pub fn with_report(self, outcome: std::result::Result<CompanyReport, AnalysisError>) -> Self {
        self.lock().reports.push_back(outcome);
        self
    }

    pub fn with_chat(self, outcome: MockChat) -> Self {
        self.lock().chats.push_back(outcome);
        self
    }

    /// Delay every answer, e.g. to exercise timeouts under a paused clock
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn report_calls(&self) -> Vec<ReportCall> {
        self.lock().report_calls.clone()
    }

    pub fn chat_calls(&self) -> Vec<ChatCall> {
        self.lock().chat_calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn wait(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait::async_trait]
impl Analyst for MockAnalyst {
    async fn generate_report(
        &self, subject: &str, focus: &[String], capabilities: &str,
    ) -> std::result::Result<CompanyReport, AnalysisError> {
        let next = {
            let mut state = self.lock();
            state.report_calls.push(ReportCall {
                subject: subject.to_string(),
                focus: focus.to_vec(),
                capabilities: capabilities.to_string(),
            });
            state.reports.pop_front()
        };
        self.wait().await;
        next.unwrap_or_else(|| Ok(sample_report(subject)))
    }

    async fn chat(&self, history: &[Message], message: &str, context: &str) -> std::result::Result<String, ChatError> {
        let next = {
            let mut state = self.lock();
            state.chat_calls.push(ChatCall {
                history: history.to_vec(),
                message: message.to_string(),
                context: context.to_string(),
            });
            state.chats.pop_front()
        };
        self.wait().await;
        match next {
            Some(MockChat::Reply(text)) => Ok(text),
            Some(MockChat::Error(e)) => Err(e),
            None => Ok(format!("**[Conclusion]** This is a mock reply to: {}", message)),
        }
    }
}

/// A plausible report with markup, sources and every section filled in
pub fn sample_report(subject: &str) -> CompanyReport {
    let source = |title: &str, path: &str| DataSource {
        title: title.to_string(),
        url: format!("https://example.com/{}", path),
    };

    CompanyReport {
        company_name: subject.to_string(),
        basic_info: BasicInfo {
            overview: format!(
                "{} runs a regional cloud and data business.\n\n**[Key Update] Announced a hybrid-cloud migration \
                 program for 2026.**",
                subject
            ),
            founding_date: "2012".to_string(),
            headquarters: "Hangzhou".to_string(),
            industry: "Cloud services".to_string(),
            funding_status: "Series C".to_string(),
            sources: vec![source("Company newsroom", "newsroom")],
        },
        key_people: vec![KeyPerson {
            name: "Lin Wei".to_string(),
            role: "CTO".to_string(),
            department: Some("Technology".to_string()),
            sources: vec![source("Leadership page", "leadership")],
        }],
        opportunities: vec![
            Opportunity {
                title: "Data platform tender".to_string(),
                kind: OpportunityKind::Tender,
                description: "**[Opportunity] Public tender for a unified analytics platform.**".to_string(),
                intervention_strategy: "Prepare a bid that leads with migration tooling.".to_string(),
                sources: vec![source("Tender notice", "tender")],
            },
            Opportunity {
                title: "Platform engineering hiring".to_string(),
                kind: OpportunityKind::Hiring,
                description: "Hiring Kubernetes and Flink engineers.".to_string(),
                intervention_strategy: "Offer managed streaming to close the skills gap.".to_string(),
                sources: Vec::new(),
            },
        ],
        risks: vec![Risk {
            severity: Severity::Medium,
            category: "Compliance".to_string(),
            description: "**[Risk Alert] Pending data-residency review.**".to_string(),
            sources: vec![source("Regulator bulletin", "bulletin")],
        }],
        sales_strategy: "• **[Sales Strategy] Open with a migration assessment.**\n• Follow with a pilot on the \
                         analytics workload."
            .to_string(),
    }
}
