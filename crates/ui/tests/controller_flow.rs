use radar_core::{AnalysisError, ChatError, ControllerError, ExecutionConfig, HistoryCategory, Message, Workspace};
use radar_providers::{MockAnalyst, MockChat};
use radar_ui::{ExecutionOutcome, ExecutionPhase, ExecutionPlan, FinalizedTranscript, TranscriptController};
use std::sync::Arc;
use std::time::Duration;

fn config() -> ExecutionConfig {
    ExecutionConfig { step_delay_ms: 800, request_timeout_secs: 30, ..Default::default() }
}

fn controller_with(mock: MockAnalyst, config: ExecutionConfig) -> (Arc<TranscriptController>, Arc<MockAnalyst>) {
    let mock = Arc::new(mock);
    let controller = TranscriptController::new(mock.clone(), Arc::new(Workspace::default()), config);
    (Arc::new(controller), mock)
}

#[tokio::test(start_paused = true)]
async fn test_scripted_execution_end_to_end() {
    let (controller, _) = controller_with(MockAnalyst::new(), config());
    let plan = ExecutionPlan::enterprise_report(Duration::from_millis(800), "failed");
    let finalizer = async {
        Ok::<_, radar_core::Error>(FinalizedTranscript::messages(vec![Message::model("R1"), Message::model("R2")]))
    };

    let observer = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(controller.is_busy());
        assert_eq!(controller.phase(), ExecutionPhase::Running(0));
        assert_eq!(controller.messages(), vec![Message::status("Initializing analysis engine...")]);

        tokio::time::sleep(Duration::from_millis(1690)).await;
        assert_eq!(controller.phase(), ExecutionPhase::Running(2));
        assert_eq!(controller.messages(), vec![Message::status("Analyzing entity relationships...")]);
    };

    let (outcome, _) = tokio::join!(controller.start_scripted_execution(plan, finalizer), observer);

    assert_eq!(outcome, Ok(ExecutionOutcome::Completed));
    assert_eq!(controller.messages(), vec![Message::model("R1"), Message::model("R2")]);
    assert!(!controller.is_busy());
    assert_eq!(controller.phase(), ExecutionPhase::Finished(ExecutionOutcome::Completed));
}

#[tokio::test(start_paused = true)]
async fn test_finalizer_error_shows_failure_notice() {
    let (controller, _) = controller_with(MockAnalyst::new(), config());
    let plan = ExecutionPlan::new(radar_ui::ExecutionKind::Custom, "Working...", "Could not finish.");
    let finalizer = async { Err::<FinalizedTranscript, _>(radar_core::Error::Other("boom".to_string())) };

    let outcome = controller.start_scripted_execution(plan, finalizer).await;

    assert_eq!(outcome, Ok(ExecutionOutcome::Failed));
    assert_eq!(controller.messages(), vec![Message::model("Could not finish.")]);
    assert!(!controller.is_busy());
}

#[tokio::test(start_paused = true)]
async fn test_follow_up_failure_appends_notice() {
    let mock = MockAnalyst::new().with_chat(MockChat::Error(ChatError::Network("connection reset".to_string())));
    let (controller, _) = controller_with(mock, config());

    let outcome = controller.send_follow_up("hello", "ctx").await;

    assert_eq!(outcome, Ok(ExecutionOutcome::Failed));
    assert_eq!(controller.messages(), vec![Message::user("hello"), Message::model("System error, please retry.")]);
    assert!(!controller.is_awaiting_reply());
}

#[tokio::test(start_paused = true)]
async fn test_follow_up_shows_user_message_while_waiting() {
    let mock = MockAnalyst::new()
        .with_chat(MockChat::Reply("Pricing starts at tier two.".to_string()))
        .with_latency(Duration::from_secs(2));
    let (controller, mock) = controller_with(mock, config());

    let observer = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(controller.is_awaiting_reply());
        assert_eq!(controller.messages(), vec![Message::user("pricing?")]);
    };
    let (outcome, _) = tokio::join!(controller.send_follow_up("  pricing?  ", "ctx"), observer);

    assert_eq!(outcome, Ok(ExecutionOutcome::Completed));
    assert_eq!(
        controller.messages(),
        vec![Message::user("pricing?"), Message::model("Pricing starts at tier two.")]
    );
    assert!(mock.chat_calls()[0].history.is_empty());
    assert!(!controller.is_awaiting_reply());
}

#[tokio::test(start_paused = true)]
async fn test_requests_rejected_while_busy() {
    let (controller, _) = controller_with(MockAnalyst::new(), config());

    let intruder = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(controller.ask("anything?").await, Err(ControllerError::Busy));
        assert_eq!(
            controller.run_policy_brief("subsidies", None, HistoryCategory::Policy).await,
            Err(ControllerError::Busy)
        );
    };
    let (outcome, _) = tokio::join!(controller.run_enterprise_report("Acme", &[]), intruder);

    assert_eq!(outcome, Ok(ExecutionOutcome::Completed));
    assert_eq!(controller.messages().len(), 3);
    assert!(controller.workspace().history_in(Some(HistoryCategory::Policy)).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_report_timeout_shows_failure_notice() {
    let mock = MockAnalyst::new().with_latency(Duration::from_secs(5));
    let config = ExecutionConfig { step_delay_ms: 0, request_timeout_secs: 1, ..Default::default() };
    let (controller, _) = controller_with(mock, config.clone());

    let outcome = controller.run_enterprise_report("Acme", &[]).await;

    assert_eq!(outcome, Ok(ExecutionOutcome::Failed));
    assert_eq!(controller.messages(), vec![Message::model(config.report_failure_notice)]);
    assert!(!controller.is_busy());
    assert!(controller.workspace().history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_report_error_shows_failure_notice() {
    let mock = MockAnalyst::new().with_report(Err(AnalysisError::Parse("missing basicInfo".to_string())));
    let (controller, _) = controller_with(mock, config());

    let outcome = controller.run_enterprise_report("Acme", &[]).await;

    assert_eq!(outcome, Ok(ExecutionOutcome::Failed));
    assert_eq!(controller.messages(), vec![Message::model(config().report_failure_notice)]);
    assert_eq!(controller.active_report(), None);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_steps() {
    let (controller, mock) = controller_with(MockAnalyst::new(), config());

    let canceller = async {
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(controller.cancel());
    };
    let (outcome, _) = tokio::join!(controller.run_enterprise_report("Acme", &[]), canceller);

    assert_eq!(outcome, Ok(ExecutionOutcome::Cancelled));
    assert_eq!(
        controller.messages(),
        vec![Message::status("Connecting multi-source data..."), Message::model("Execution cancelled.")]
    );
    assert!(!controller.is_busy());
    assert!(!controller.cancel());
    assert!(mock.report_calls().is_empty());
    assert!(controller.workspace().history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_enterprise_report_flow() {
    let (controller, mock) = controller_with(MockAnalyst::new(), config());

    let outcome = controller.run_enterprise_report("  Acme  ", &[]).await;
    assert_eq!(outcome, Ok(ExecutionOutcome::Completed));

    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].text.starts_with("Analysis report complete"));

    let labels: Vec<String> = controller.nav_points().into_iter().map(|p| p.label).collect();
    assert_eq!(labels, vec!["Company Profile", "Opportunity Intelligence", "Sales Strategy"]);

    let calls = mock.report_calls();
    assert_eq!(calls[0].subject, "Acme");
    assert_eq!(calls[0].focus.len(), 5);

    let history = controller.workspace().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].category, HistoryCategory::Monitoring);
    assert_eq!(history[0].summary, "Company analysis: Acme");
    assert_eq!(history[0].chat_history.len(), 3);

    let outcome = controller.ask("Who signs off on purchases?").await;
    assert_eq!(outcome, Ok(ExecutionOutcome::Completed));

    let chat = &mock.chat_calls()[0];
    assert_eq!(chat.history.len(), 3);
    assert!(chat.context.contains("\"companyName\":\"Acme\""));

    let labels: Vec<String> = controller.nav_points().into_iter().map(|p| p.label).collect();
    assert_eq!(labels.last().map(String::as_str), Some("Reply #4"));
}

#[tokio::test(start_paused = true)]
async fn test_policy_brief_flow() {
    let mock = MockAnalyst::new().with_chat(MockChat::Reply("**[Conclusion]** Eligible for the subsidy.".to_string()));
    let (controller, mock) = controller_with(mock, config());

    let outcome = controller
        .run_policy_brief("Are data-centre builds covered by the 2026 subsidy?", Some("Cloud"), HistoryCategory::Policy)
        .await;
    assert_eq!(outcome, Ok(ExecutionOutcome::Completed));

    let messages = controller.messages();
    assert_eq!(
        messages,
        vec![
            Message::user("Are data-centre builds covered by the 2026 subsidy?"),
            Message::model("**[Conclusion]** Eligible for the subsidy."),
        ]
    );
    assert_eq!(controller.active_report(), None);
    assert_eq!(mock.chat_calls()[0].context, radar_ui::controller::POLICY_CONTEXT);

    let history = controller.workspace().history_in(Some(HistoryCategory::Policy));
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].summary, "Policy analysis: Are data-centre buil");
}

#[tokio::test(start_paused = true)]
async fn test_new_execution_clears_feedback() {
    let (controller, _) = controller_with(MockAnalyst::new(), config());
    controller.toggle_feedback(0);
    assert!(controller.feedback(0).is_open);

    controller.run_enterprise_report("Acme", &[]).await.unwrap();

    assert!(!controller.feedback(0).is_open);
}
