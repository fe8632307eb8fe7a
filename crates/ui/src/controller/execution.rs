use radar_core::{CompanyReport, Message};
use std::time::Duration;

/// Which scripted flow produced a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionKind {
    EnterpriseReport,
    PolicyBrief,
    Custom,
}

impl ExecutionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionKind::EnterpriseReport => "enterprise-report",
            ExecutionKind::PolicyBrief => "policy-brief",
            ExecutionKind::Custom => "custom",
        }
    }
}

/// Progress script shown while the finalizer runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub kind: ExecutionKind,
    pub initial_status: String,
    pub steps: Vec<String>,
    pub step_delay: Duration,
    /// Message shown in place of the transcript if the finalizer fails
    pub failure_notice: String,
}

impl ExecutionPlan {
    pub fn new(kind: ExecutionKind, initial_status: impl Into<String>, failure_notice: impl Into<String>) -> Self {
        Self {
            kind,
            initial_status: initial_status.into(),
            steps: Vec::new(),
            step_delay: Duration::ZERO,
            failure_notice: failure_notice.into(),
        }
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn enterprise_report(step_delay: Duration, failure_notice: impl Into<String>) -> Self {
        Self::new(ExecutionKind::EnterpriseReport, "Initializing analysis engine...", failure_notice)
            .with_steps([
                "Connecting multi-source data...",
                "Analyzing entity relationships...",
                "Drafting strategy report framework...",
            ])
            .with_step_delay(step_delay)
    }

    pub fn policy_brief(step_delay: Duration, failure_notice: impl Into<String>) -> Self {
        Self::new(ExecutionKind::PolicyBrief, "Loading policy context...", failure_notice)
            .with_steps(["Extracting key clauses...", "Drafting interpretation..."])
            .with_step_delay(step_delay)
    }
}

/// What a successful finalizer hands back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedTranscript {
    pub messages: Vec<Message>,
    /// Report the messages were formatted from, kept as follow-up context
    pub report: Option<CompanyReport>,
}

impl FinalizedTranscript {
    pub fn messages(messages: Vec<Message>) -> Self {
        Self { messages, report: None }
    }

    pub fn report(messages: Vec<Message>, report: CompanyReport) -> Self {
        Self { messages, report: Some(report) }
    }
}

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionOutcome {
    Completed,
    Failed,
    Cancelled,
}

/// Progress of the current (or last) request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPhase {
    #[default]
    Idle,
    /// Showing progress step `n` (0 is the initial status)
    Running(usize),
    /// Waiting on the collaborator
    Finalizing,
    /// Last request ended; stays until the next one starts
    Finished(ExecutionOutcome),
}

impl ExecutionPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, ExecutionPhase::Running(_) | ExecutionPhase::Finalizing)
    }
}
