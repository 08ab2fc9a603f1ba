use std::collections::VecDeque;

use async_trait::async_trait;
use shared::{domain::Citation, protocol::CitationPayload};
use tokio::sync::Mutex;

use super::*;

struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<LawsQueryResponse, QueryError>>>,
    issued: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(replies: Vec<Result<LawsQueryResponse, QueryError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            issued: Mutex::new(Vec::new()),
        }
    }

    async fn issued(&self) -> Vec<String> {
        self.issued.lock().await.clone()
    }
}

#[async_trait]
impl QueryTransport for ScriptedTransport {
    async fn fetch_answer(&self, query: &str) -> Result<LawsQueryResponse, QueryError> {
        self.issued.lock().await.push(query.to_string());
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(QueryError::transport("no scripted reply left")))
    }
}

fn answer(query: &str, response: &str, citations: &[(&str, &str)]) -> LawsQueryResponse {
    LawsQueryResponse {
        query: query.to_string(),
        response: response.to_string(),
        citations: citations
            .iter()
            .map(|(source, text)| CitationPayload {
                source: source.to_string(),
                text: text.to_string(),
            })
            .collect(),
    }
}

#[tokio::test]
async fn successful_submission_records_answer_and_clears_draft() {
    let query = "What are the laws about slavery?";
    let transport = ScriptedTransport::new(vec![Ok(answer(
        query,
        "Slavery is forbidden in the Seven Kingdoms.",
        &[("Law 12", "No man may be bought or sold.")],
    ))]);
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text(query);

    let outcome = controller.submit(&transport).await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(controller.request_state(), RequestState::Succeeded);
    assert_eq!(controller.draft(), "");
    assert_eq!(controller.history().len(), 1);
    let record = controller.latest_record().expect("record at index 0");
    assert_eq!(record.query, query);
    assert_eq!(
        record.citations,
        vec![Citation::new("Law 12", "No man may be bought or sold.")]
    );
    assert_eq!(transport.issued().await, vec![query.to_string()]);
}

#[tokio::test]
async fn round_trip_preserves_fields_exactly() {
    let transport = ScriptedTransport::new(vec![Ok(answer("Q", "R", &[("S1", "T1")]))]);
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("Q");

    controller.submit(&transport).await;

    assert_eq!(
        controller.history().all().next().cloned(),
        Some(QueryRecord {
            query: "Q".to_string(),
            response: "R".to_string(),
            citations: vec![Citation::new("S1", "T1")],
        })
    );
}

#[tokio::test]
async fn submitted_text_is_trimmed() {
    let transport = ScriptedTransport::new(vec![Ok(answer("x", "y", &[]))]);
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("   How are trials conducted?\t ");

    controller.submit(&transport).await;

    assert_eq!(
        transport.issued().await,
        vec!["How are trials conducted?".to_string()]
    );
    assert_eq!(
        controller.latest_record().map(|r| r.query.as_str()),
        Some("How are trials conducted?")
    );
}

#[tokio::test]
async fn server_error_keeps_draft_and_reports_status() {
    let transport = ScriptedTransport::new(vec![Err(QueryError::Protocol {
        status: 500,
        detail: None,
    })]);
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("...");

    let outcome = controller.submit(&transport).await;

    let SubmitOutcome::Failed(notice) = &outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(notice.kind(), NoticeKind::Protocol);
    assert_eq!(notice.status(), Some(500));
    assert!(notice.message().contains("500"));
    assert_eq!(controller.request_state(), RequestState::Failed);
    assert_eq!(controller.draft(), "...");
    assert!(controller.history().is_empty());
    assert!(controller.can_submit());
}

#[tokio::test]
async fn whitespace_only_draft_never_issues_a_request() {
    let transport = ScriptedTransport::new(vec![]);
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("     ");

    assert!(!controller.can_submit());
    let outcome = controller.submit(&transport).await;

    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert_eq!(controller.request_state(), RequestState::Idle);
    assert!(transport.issued().await.is_empty());
    assert!(controller.notice().is_none());
}

#[test]
fn repeated_submits_while_pending_issue_one_request() {
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("What are the tax laws?");

    let first = controller.begin_submit().expect("first submit dispatches");
    for _ in 0..5 {
        assert!(controller.begin_submit().is_none());
    }
    assert_eq!(controller.request_state(), RequestState::Pending);
    assert!(!controller.can_submit());

    let disposition = controller.complete(first, Ok(answer("q", "taxes", &[])));
    assert_eq!(disposition, CompletionDisposition::Applied);
    assert_eq!(controller.history().len(), 1);
}

#[tokio::test]
async fn history_is_reverse_chronological() {
    let queries = ["first question", "second question", "third question"];
    let transport = ScriptedTransport::new(
        queries
            .iter()
            .map(|q| Ok(answer(q, &format!("answer to {q}"), &[])))
            .collect(),
    );
    let mut controller = QuerySubmissionController::new();

    for query in queries {
        controller.set_query_text(query);
        assert_eq!(controller.submit(&transport).await, SubmitOutcome::Succeeded);
    }

    let recorded: Vec<&str> = controller
        .history()
        .all()
        .map(|record| record.query.as_str())
        .collect();
    assert_eq!(
        recorded,
        vec!["third question", "second question", "first question"]
    );
}

#[tokio::test]
async fn failure_then_retry_succeeds_and_clears_notice() {
    let transport = ScriptedTransport::new(vec![
        Err(QueryError::transport("connection refused")),
        Ok(answer("retry", "ok", &[])),
    ]);
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("retry");

    let SubmitOutcome::Failed(notice) = controller.submit(&transport).await else {
        panic!("first attempt should fail");
    };
    assert_eq!(notice.kind(), NoticeKind::Transport);
    assert!(notice.message().contains("connection refused"));

    assert_eq!(controller.submit(&transport).await, SubmitOutcome::Succeeded);
    assert!(controller.notice().is_none());
    assert_eq!(transport.issued().await, vec!["retry", "retry"]);
}

#[tokio::test]
async fn malformed_body_yields_generic_notice() {
    let transport = ScriptedTransport::new(vec![Err(QueryError::shape(
        "missing field `response`",
    ))]);
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("What are the tax laws?");

    let SubmitOutcome::Failed(notice) = controller.submit(&transport).await else {
        panic!("shape errors are failures");
    };
    assert_eq!(notice.kind(), NoticeKind::Shape);
    assert!(!notice.message().contains("missing field"));
    assert!(controller.history().is_empty());
}

#[test]
fn record_uses_text_sent_even_if_draft_changed_meanwhile() {
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("original question");
    let ticket = controller.begin_submit().expect("dispatch");

    controller.set_query_text("typing the next one");
    controller.complete(ticket, Ok(answer("original question", "answer", &[])));

    assert_eq!(
        controller.latest_record().map(|r| r.query.as_str()),
        Some("original question")
    );
    assert_eq!(controller.draft(), "");
}

#[test]
fn completion_after_teardown_is_discarded() {
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text("What are the laws about slavery?");
    let ticket = controller.begin_submit().expect("dispatch");

    controller.teardown();
    assert!(controller.is_torn_down());
    let disposition = controller.complete(ticket, Ok(answer("q", "late", &[])));

    assert_eq!(disposition, CompletionDisposition::Discarded);
    assert!(controller.history().is_empty());
    assert!(controller.begin_submit().is_none());
}

#[test]
fn ticket_from_another_view_is_discarded() {
    let mut old_view = QuerySubmissionController::new();
    old_view.set_query_text("old");
    let stale = old_view.begin_submit().expect("dispatch");

    let mut new_view = QuerySubmissionController::new();
    new_view.set_query_text("new");
    let current = new_view.begin_submit().expect("dispatch");
    assert_ne!(stale.session(), current.session());

    assert_eq!(
        new_view.complete(stale, Ok(answer("old", "late", &[]))),
        CompletionDisposition::Discarded
    );
    assert_eq!(new_view.request_state(), RequestState::Pending);

    assert_eq!(
        new_view.complete(current, Ok(answer("new", "fresh", &[]))),
        CompletionDisposition::Applied
    );
    assert_eq!(new_view.history().len(), 1);
}

#[test]
fn transition_ignores_outdated_generation() {
    let (state, effect) = transition(
        ControllerState::new(7),
        ControllerEvent::DraftChanged("question".into()),
    );
    assert!(effect.is_none());

    let (state, effect) = transition(state, ControllerEvent::SubmitRequested);
    let Some(Effect::Dispatch(first)) = effect else {
        panic!("expected dispatch");
    };
    let (state, _) = transition(
        state,
        ControllerEvent::Resolved {
            ticket: first.clone(),
            outcome: Err(QueryError::transport("reset")),
        },
    );
    assert_eq!(state.request(), RequestState::Failed);

    let (state, effect) = transition(state, ControllerEvent::SubmitRequested);
    assert!(matches!(effect, Some(Effect::Dispatch(ref t)) if t.generation() == 2));

    let (state, effect) = transition(
        state,
        ControllerEvent::Resolved {
            ticket: first,
            outcome: Ok(answer("question", "late", &[])),
        },
    );
    assert!(effect.is_none());
    assert_eq!(state.request(), RequestState::Pending);
    assert!(state.history().is_empty());
}
