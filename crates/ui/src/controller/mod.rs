//! Transcript controller: the only writer of the chat transcript.
//!
//! All operations take `&self`. State sits behind a mutex that is locked
//! only between suspension points, so readers always see the latest
//! progress while an execution or follow-up is awaiting the analyst.

mod execution;
mod report;

pub use execution::{ExecutionKind, ExecutionOutcome, ExecutionPhase, ExecutionPlan, FinalizedTranscript};
pub use report::{DEFAULT_FOCUS_AREAS, format_report, format_sources};

use crate::transcript::{FeedbackBook, FeedbackReason, FeedbackState, NavPoint, Transcript, nav_points};
use radar_core::store::{new_id, today};
use radar_core::{
    CompanyReport, ControllerError, ExecutionConfig, FollowOutcome, HistoryCategory, HistoryItem, Message, Workspace,
};
use radar_providers::{Analyst, policy_prompt};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// Context string sent with policy interpretation requests
pub const POLICY_CONTEXT: &str = "industry policy interpretation";

/// Context string for follow-ups when no report is loaded
pub const DEFAULT_CONTEXT: &str = "contextual conversation";

#[derive(Debug, Default)]
struct ControllerState {
    transcript: Transcript,
    feedback: FeedbackBook,
    is_busy: bool,
    is_awaiting_reply: bool,
    phase: ExecutionPhase,
    report: Option<CompanyReport>,
    /// Transcript was produced by the enterprise report finalizer
    from_report: bool,
    cancel: CancellationToken,
}

fn lock(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Busy,
    AwaitingReply,
}

/// Clears a request flag however the request ends, including when its
/// future is dropped mid-flight
struct FlagGuard<'a> {
    state: &'a Mutex<ControllerState>,
    flag: Flag,
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        match self.flag {
            Flag::Busy => {
                state.is_busy = false;
                if state.phase.is_active() {
                    tracing::debug!("execution dropped before completion");
                    state.phase = ExecutionPhase::Finished(ExecutionOutcome::Cancelled);
                }
            }
            Flag::AwaitingReply => state.is_awaiting_reply = false,
        }
    }
}

pub struct TranscriptController {
    analyst: Arc<dyn Analyst>,
    workspace: Arc<Workspace>,
    config: ExecutionConfig,
    state: Mutex<ControllerState>,
}

impl TranscriptController {
    pub fn new(analyst: Arc<dyn Analyst>, workspace: Arc<Workspace>, config: ExecutionConfig) -> Self {
        Self { analyst, workspace, config, state: Mutex::new(ControllerState::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        lock(&self.state)
    }

    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    pub fn transcript(&self) -> Transcript {
        self.lock().transcript.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock().transcript.messages().to_vec()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().is_busy
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.lock().is_awaiting_reply
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.lock().phase
    }

    pub fn active_report(&self) -> Option<CompanyReport> {
        self.lock().report.clone()
    }

    /// Jump targets over model answers, derived on every call
    pub fn nav_points(&self) -> Vec<NavPoint> {
        let state = self.lock();
        nav_points(state.transcript.messages(), state.from_report)
    }

    /// Rewrite the trailing status placeholder, or append a new one
    pub fn replace_or_append_thinking(&self, text: impl Into<String>) {
        self.lock().transcript.replace_or_append_status(text);
    }

    /// Cancel the running scripted execution, if any
    pub fn cancel(&self) -> bool {
        let state = self.lock();
        if state.is_busy {
            state.cancel.cancel();
        }
        state.is_busy
    }

    fn begin_execution(&self, plan: &ExecutionPlan) -> Result<(FlagGuard<'_>, CancellationToken), ControllerError> {
        let mut state = self.lock();
        if state.is_busy || state.is_awaiting_reply {
            tracing::debug!(kind = plan.kind.as_str(), "execution rejected while busy");
            return Err(ControllerError::Busy);
        }

        state.is_busy = true;
        state.phase = ExecutionPhase::Running(0);
        state.transcript.replace_all(vec![Message::status(plan.initial_status.clone())]);
        state.feedback.clear();
        state.report = None;
        state.from_report = false;
        state.cancel = CancellationToken::new();
        let token = state.cancel.clone();
        drop(state);

        Ok((FlagGuard { state: &self.state, flag: Flag::Busy }, token))
    }

    fn finish_cancelled(&self, kind: ExecutionKind) -> ExecutionOutcome {
        let mut state = self.lock();
        state.transcript.push(Message::model(self.config.cancelled_notice.clone()));
        state.phase = ExecutionPhase::Finished(ExecutionOutcome::Cancelled);
        tracing::info!(kind = kind.as_str(), "execution cancelled");
        ExecutionOutcome::Cancelled
    }

    /// Show `plan`'s progress steps, then replace the transcript with what
    /// `finalizer` produces
    ///
    /// The finalizer is bounded by the configured request timeout. On error
    /// or timeout the transcript becomes the plan's failure notice; the
    /// error itself is only logged.
    pub async fn start_scripted_execution<F>(
        &self, plan: ExecutionPlan, finalizer: F,
    ) -> Result<ExecutionOutcome, ControllerError>
    where
        F: Future<Output = radar_core::Result<FinalizedTranscript>>,
    {
        let (_busy, cancel) = self.begin_execution(&plan)?;
        tracing::info!(kind = plan.kind.as_str(), steps = plan.steps.len(), "execution started");

        for (i, step) in plan.steps.iter().enumerate() {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(self.finish_cancelled(plan.kind)),
                _ = tokio::time::sleep(plan.step_delay) => {}
            }
            {
                let mut state = self.lock();
                state.phase = ExecutionPhase::Running(i + 1);
                state.transcript.replace_or_append_status(step.clone());
            }
            tracing::debug!(kind = plan.kind.as_str(), step = %step, "execution step");
        }

        if cancel.is_cancelled() {
            return Ok(self.finish_cancelled(plan.kind));
        }
        self.lock().phase = ExecutionPhase::Finalizing;

        let timeout = self.config.request_timeout();
        let result = tokio::select! {
            _ = cancel.cancelled() => return Ok(self.finish_cancelled(plan.kind)),
            result = tokio::time::timeout(timeout, finalizer) => result,
        };

        let mut state = self.lock();
        let outcome = match result {
            Ok(Ok(finalized)) => {
                state.transcript.replace_all(finalized.messages);
                state.from_report = finalized.report.is_some();
                state.report = finalized.report;
                tracing::info!(kind = plan.kind.as_str(), messages = state.transcript.len(), "execution completed");
                ExecutionOutcome::Completed
            }
            Ok(Err(e)) => {
                tracing::warn!(kind = plan.kind.as_str(), error = %e, "execution failed");
                state.transcript.replace_all(vec![Message::model(plan.failure_notice.clone())]);
                ExecutionOutcome::Failed
            }
            Err(_) => {
                tracing::warn!(kind = plan.kind.as_str(), ?timeout, "execution timed out");
                state.transcript.replace_all(vec![Message::model(plan.failure_notice.clone())]);
                ExecutionOutcome::Failed
            }
        };
        state.phase = ExecutionPhase::Finished(outcome);
        Ok(outcome)
    }

    /// Ask a follow-up question about the current transcript
    ///
    /// The user message is appended before the analyst is called; the reply
    /// (or the failure notice) is appended when it arrives.
    pub async fn send_follow_up(&self, user_text: &str, context: &str) -> Result<ExecutionOutcome, ControllerError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(ControllerError::EmptyMessage);
        }

        let history = {
            let mut state = self.lock();
            if state.is_busy || state.is_awaiting_reply {
                return Err(ControllerError::Busy);
            }
            let history = state.transcript.content_messages();
            state.transcript.push(Message::user(text));
            state.is_awaiting_reply = true;
            history
        };
        let _awaiting = FlagGuard { state: &self.state, flag: Flag::AwaitingReply };
        tracing::debug!(history = history.len(), "follow-up sent");

        let timeout = self.config.request_timeout();
        let result = tokio::time::timeout(timeout, self.analyst.chat(&history, text, context)).await;

        let mut state = self.lock();
        match result {
            Ok(Ok(reply)) => {
                state.transcript.push(Message::model(reply));
                Ok(ExecutionOutcome::Completed)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "follow-up failed");
                state.transcript.push(Message::model(self.config.chat_failure_notice.clone()));
                Ok(ExecutionOutcome::Failed)
            }
            Err(_) => {
                tracing::warn!(?timeout, "follow-up timed out");
                state.transcript.push(Message::model(self.config.chat_failure_notice.clone()));
                Ok(ExecutionOutcome::Failed)
            }
        }
    }

    /// Follow-up using [`Self::follow_up_context`]
    pub async fn ask(&self, user_text: &str) -> Result<ExecutionOutcome, ControllerError> {
        let context = self.follow_up_context();
        self.send_follow_up(user_text, &context).await
    }

    /// JSON of the active report, or a generic context when none is loaded
    pub fn follow_up_context(&self) -> String {
        self.lock()
            .report
            .as_ref()
            .and_then(|r| serde_json::to_string(r).ok())
            .unwrap_or_else(|| DEFAULT_CONTEXT.to_string())
    }

    /// Run the enterprise analysis for `company` and record it in history
    pub async fn run_enterprise_report(
        &self, company: &str, focus: &[String],
    ) -> Result<ExecutionOutcome, ControllerError> {
        let company = company.trim();
        if company.is_empty() {
            return Err(ControllerError::EmptyMessage);
        }

        let focus: Vec<String> = if focus.is_empty() {
            DEFAULT_FOCUS_AREAS.iter().map(|s| s.to_string()).collect()
        } else {
            focus.to_vec()
        };
        let capabilities = self.workspace.user().business_capabilities;
        let plan = ExecutionPlan::enterprise_report(self.config.step_delay(), &self.config.report_failure_notice);

        let analyst = Arc::clone(&self.analyst);
        let subject = company.to_string();
        let finalizer = async move {
            let report = analyst.generate_report(&subject, &focus, &capabilities).await?;
            Ok::<_, radar_core::Error>(FinalizedTranscript::report(format_report(&report), report))
        };

        let outcome = self.start_scripted_execution(plan, finalizer).await?;
        if outcome == ExecutionOutcome::Completed {
            let summary = match self.active_report() {
                Some(report) => format!("Company analysis: {}", report.company_name),
                None => format!("Company analysis: {}", company),
            };
            self.record_history(HistoryCategory::Monitoring, company, summary);
        }
        Ok(outcome)
    }

    /// Run a policy interpretation and record it in history under `category`
    pub async fn run_policy_brief(
        &self, query: &str, context: Option<&str>, category: HistoryCategory,
    ) -> Result<ExecutionOutcome, ControllerError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ControllerError::EmptyMessage);
        }

        let plan = ExecutionPlan::policy_brief(self.config.step_delay(), &self.config.chat_failure_notice);
        let prompt = policy_prompt(query, context.unwrap_or_default());

        let analyst = Arc::clone(&self.analyst);
        let user_query = query.to_string();
        let finalizer = async move {
            let reply = analyst.chat(&[], &prompt, POLICY_CONTEXT).await?;
            Ok::<_, radar_core::Error>(FinalizedTranscript::messages(vec![
                Message::user(user_query),
                Message::model(reply),
            ]))
        };

        let outcome = self.start_scripted_execution(plan, finalizer).await?;
        if outcome == ExecutionOutcome::Completed {
            let short: String = query.chars().take(20).collect();
            self.record_history(category, query, format!("Policy analysis: {}", short));
        }
        Ok(outcome)
    }

    fn record_history(&self, category: HistoryCategory, query: &str, summary: String) {
        let (report, chat_history) = {
            let state = self.lock();
            (state.report.clone(), state.transcript.content_messages())
        };
        let id = new_id();
        tracing::info!(id = %id, category = category.label(), "history recorded");
        self.workspace.add_history(HistoryItem {
            id,
            category,
            query: query.to_string(),
            date: today(),
            summary,
            report,
            chat_history,
        });
    }

    /// Load a saved conversation into an idle controller
    pub fn restore(&self, item: &HistoryItem) -> Result<(), ControllerError> {
        let mut state = self.lock();
        if state.is_busy || state.is_awaiting_reply {
            return Err(ControllerError::Busy);
        }

        state.transcript.replace_all(item.chat_history.clone());
        state.report = item.report.clone();
        state.from_report = state.report.is_some();
        state.feedback.clear();
        state.phase = ExecutionPhase::Idle;
        tracing::debug!(id = %item.id, messages = item.chat_history.len(), "history restored");
        Ok(())
    }

    /// Add the active report's company to the watchlist
    ///
    /// A newly followed company starts with the report's opportunities as
    /// unread updates.
    pub fn follow_current_company(&self) -> Option<FollowOutcome> {
        let report = self.active_report()?;
        let industry = report.basic_info.industry.trim();
        let industry = (!industry.is_empty()).then(|| industry.to_string());

        let outcome = self.workspace.follow(&report.company_name, industry);
        if let FollowOutcome::Added(id) = &outcome {
            for opportunity in report.opportunities.iter().rev() {
                let text = format!("{}: {}", opportunity.title, opportunity.description);
                self.workspace.push_update(id, text, opportunity.kind.into());
            }
        }
        Some(outcome)
    }

    /// Remove the active report's company from the watchlist
    pub fn unfollow_current_company(&self) -> bool {
        let Some(report) = self.active_report() else {
            return false;
        };
        self.workspace
            .followed()
            .into_iter()
            .find(|c| c.name == report.company_name)
            .is_some_and(|c| self.workspace.unfollow(&c.id))
    }

    pub fn is_current_company_followed(&self) -> bool {
        self.active_report().is_some_and(|r| self.workspace.is_followed(&r.company_name))
    }

    pub fn feedback(&self, index: usize) -> FeedbackState {
        self.lock().feedback.get(index)
    }

    pub fn toggle_feedback(&self, index: usize) {
        self.lock().feedback.toggle(index);
    }

    pub fn set_feedback_reason(&self, index: usize, reason: FeedbackReason) {
        self.lock().feedback.set_reason(index, reason);
    }

    pub fn set_feedback_detail(&self, index: usize, detail: impl Into<String>) {
        self.lock().feedback.set_detail(index, detail);
    }

    /// Returns `false` if no reason is selected or it was already submitted
    pub fn submit_feedback(&self, index: usize) -> bool {
        let mut state = self.lock();
        let submitted = state.feedback.submit(index);
        if submitted {
            let reason = state.feedback.get(index).reason.map(|r| r.label()).unwrap_or_default();
            tracing::info!(index, reason, "feedback submitted");
        }
        submitted
    }
}
