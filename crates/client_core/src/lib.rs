//! Client-side core of the legal query desk: submission lifecycle, transcript,
//! remote transport and the document display contract.

pub mod config;
pub mod controller;
pub mod document;
pub mod history;
pub mod transcript;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use controller::{
    transition, CompletionDisposition, ControllerEvent, ControllerState, Effect, Notice,
    NoticeKind, PendingQuery, QuerySubmissionController, RequestState, SubmitOutcome,
};
pub use document::{DocumentPresenter, ExternalLink};
pub use history::ResultHistoryStore;
pub use transport::{HttpQueryTransport, QueryTransport, TransportConfigError};
