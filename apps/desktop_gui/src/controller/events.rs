//! Events flowing from the backend worker back to the UI thread.

use client_core::PendingQuery;
use shared::{error::QueryError, protocol::LawsQueryResponse};

pub enum UiEvent {
    Info(String),
    BackendUnavailable(String),
    QueryCompleted {
        ticket: PendingQuery,
        outcome: Result<LawsQueryResponse, QueryError>,
    },
}
