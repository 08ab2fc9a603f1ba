//! Query submission lifecycle: draft text, one in-flight request at a time, and
//! the transcript of completed answers.
//!
//! All state lives in a single owned [`ControllerState`]; every change goes
//! through [`transition`]. Requests are identified by a [`PendingQuery`]
//! ticket so that a completion arriving for a superseded or torn-down view is
//! recognised and dropped instead of being applied.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use shared::{domain::QueryRecord, error::QueryError, protocol::LawsQueryResponse};
use tracing::{debug, info, warn};

use crate::{history::ResultHistoryStore, transport::QueryTransport};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Transport,
    Protocol,
    Shape,
}

/// Human-readable failure report shown to the user after a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    status: Option<u16>,
    message: String,
}

impl Notice {
    pub fn from_error(err: &QueryError) -> Self {
        let kind = match err {
            QueryError::Validation => NoticeKind::Validation,
            QueryError::Transport(_) => NoticeKind::Transport,
            QueryError::Protocol { .. } => NoticeKind::Protocol,
            QueryError::Shape { .. } => NoticeKind::Shape,
        };
        Self {
            kind,
            status: err.status(),
            message: format!("Query failed: {err}"),
        }
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ticket for one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    session: u64,
    generation: u64,
    query: String,
}

impl PendingQuery {
    /// The trimmed text to send as the `query` parameter.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn session(&self) -> u64 {
        self.session
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    session: u64,
    generation: u64,
    draft: String,
    request: RequestState,
    history: ResultHistoryStore,
    notice: Option<Notice>,
}

impl ControllerState {
    pub fn new(session: u64) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn request(&self) -> RequestState {
        self.request
    }

    pub fn history(&self) -> &ResultHistoryStore {
        &self.history
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.request != RequestState::Pending && !self.draft.trim().is_empty()
    }

    fn owns(&self, ticket: &PendingQuery) -> bool {
        self.request == RequestState::Pending
            && ticket.session == self.session
            && ticket.generation == self.generation
    }
}

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    DraftChanged(String),
    SubmitRequested,
    Resolved {
        ticket: PendingQuery,
        outcome: Result<LawsQueryResponse, QueryError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one request for the ticket.
    Dispatch(PendingQuery),
    /// A record was added to the front of the history.
    Recorded,
    /// Surface the notice to the user.
    Notify(Notice),
}

/// Pure state transition. `None` means the event changed nothing observable
/// beyond the draft (draft edits, rejected submits, stale completions).
pub fn transition(
    mut state: ControllerState,
    event: ControllerEvent,
) -> (ControllerState, Option<Effect>) {
    match event {
        ControllerEvent::DraftChanged(text) => {
            state.draft = text;
            (state, None)
        }
        ControllerEvent::SubmitRequested => {
            if !state.can_submit() {
                return (state, None);
            }
            state.generation += 1;
            state.request = RequestState::Pending;
            state.notice = None;
            let ticket = PendingQuery {
                session: state.session,
                generation: state.generation,
                query: state.draft.trim().to_string(),
            };
            (state, Some(Effect::Dispatch(ticket)))
        }
        ControllerEvent::Resolved { ticket, outcome } => {
            if !state.owns(&ticket) {
                return (state, None);
            }
            match outcome {
                Ok(response) => {
                    state.history.prepend(response.into_record(&ticket.query));
                    state.request = RequestState::Succeeded;
                    state.draft.clear();
                    (state, Some(Effect::Recorded))
                }
                Err(err) => {
                    let notice = Notice::from_error(&err);
                    state.request = RequestState::Failed;
                    state.notice = Some(notice.clone());
                    (state, Some(Effect::Notify(notice)))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionDisposition {
    Applied,
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty draft or a request already in flight; nothing was sent.
    Rejected,
    Succeeded,
    Failed(Notice),
}

/// Owns the draft, the request lifecycle and the transcript for one view.
#[derive(Debug)]
pub struct QuerySubmissionController {
    state: ControllerState,
    torn_down: bool,
}

impl Default for QuerySubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl QuerySubmissionController {
    pub fn new() -> Self {
        Self {
            state: ControllerState::new(NEXT_SESSION.fetch_add(1, Ordering::Relaxed)),
            torn_down: false,
        }
    }

    fn apply(&mut self, event: ControllerEvent) -> Option<Effect> {
        let (next, effect) = transition(std::mem::take(&mut self.state), event);
        self.state = next;
        effect
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.apply(ControllerEvent::DraftChanged(text.into()));
    }

    pub fn draft(&self) -> &str {
        self.state.draft()
    }

    pub fn request_state(&self) -> RequestState {
        self.state.request()
    }

    pub fn history(&self) -> &ResultHistoryStore {
        self.state.history()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.state.notice()
    }

    pub fn can_submit(&self) -> bool {
        !self.torn_down && self.state.can_submit()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Moves to `Pending` and hands out the ticket for the request to issue.
    /// Returns `None` without any transition when submission is not allowed.
    pub fn begin_submit(&mut self) -> Option<PendingQuery> {
        if self.torn_down {
            return None;
        }
        match self.apply(ControllerEvent::SubmitRequested) {
            Some(Effect::Dispatch(ticket)) => {
                info!(
                    session = ticket.session,
                    generation = ticket.generation,
                    query_len = ticket.query.len(),
                    "dispatching laws query"
                );
                Some(ticket)
            }
            _ => None,
        }
    }

    /// Feeds the result of a dispatched request back in.
    pub fn complete(
        &mut self,
        ticket: PendingQuery,
        outcome: Result<LawsQueryResponse, QueryError>,
    ) -> CompletionDisposition {
        if self.torn_down {
            debug!(
                session = ticket.session,
                generation = ticket.generation,
                "dropping completion for torn-down view"
            );
            return CompletionDisposition::Discarded;
        }

        let session = ticket.session;
        let generation = ticket.generation;
        match self.apply(ControllerEvent::Resolved { ticket, outcome }) {
            Some(Effect::Recorded) => {
                info!(
                    session,
                    generation,
                    history_len = self.history().len(),
                    "laws query answered"
                );
                CompletionDisposition::Applied
            }
            Some(Effect::Notify(notice)) => {
                warn!(session, generation, status = ?notice.status(), "{notice}");
                CompletionDisposition::Applied
            }
            _ => {
                debug!(session, generation, "dropping stale completion");
                CompletionDisposition::Discarded
            }
        }
    }

    /// Runs one full submission against `transport`.
    pub async fn submit<T>(&mut self, transport: &T) -> SubmitOutcome
    where
        T: QueryTransport + ?Sized,
    {
        let Some(ticket) = self.begin_submit() else {
            return SubmitOutcome::Rejected;
        };
        let outcome = transport.fetch_answer(ticket.query()).await;
        self.complete(ticket, outcome);

        match (self.request_state(), self.notice()) {
            (RequestState::Failed, Some(notice)) => SubmitOutcome::Failed(notice.clone()),
            _ => SubmitOutcome::Succeeded,
        }
    }

    /// Marks the owning view as gone; later completions are discarded.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    pub fn latest_record(&self) -> Option<&QueryRecord> {
        self.history().get(0)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
