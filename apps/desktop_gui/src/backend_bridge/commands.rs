//! Backend commands queued from UI to backend worker.

use client_core::PendingQuery;

pub enum BackendCommand {
    AskQuestion { ticket: PendingQuery },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::AskQuestion { .. } => "ask_question",
        }
    }
}
