use client_core::{
    ClientSettings, CompletionDisposition, DocumentPresenter, Notice, PendingQuery,
    QuerySubmissionController, RequestState,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{error::QueryError, protocol::LawsQueryResponse};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::pages::{self, ChatAction};

pub const DOCUMENT_TITLE: &str = "Laws of the Seven Kingdoms PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Chat,
    Documents,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Chat, Page::Documents];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Chat => "New Conversation",
            Page::Documents => "Documents",
        }
    }
}

pub struct LawDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    page: Page,
    chat: QuerySubmissionController,
    document: DocumentPresenter,
    alert: Option<Notice>,
    status: String,
    backend_error: Option<String>,
}

impl LawDeskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &ClientSettings,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            page: Page::Home,
            chat: QuerySubmissionController::new(),
            document: DocumentPresenter::new(settings.document_url(), DOCUMENT_TITLE),
            alert: None,
            status: String::new(),
            backend_error: None,
        }
    }

    /// Switches pages. Leaving the chat page destroys its transcript and
    /// any in-flight request's claim on it.
    pub fn navigate(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        if self.page == Page::Chat {
            self.chat.teardown();
            self.chat = QuerySubmissionController::new();
            self.alert = None;
        }
        tracing::debug!(from = ?self.page, to = ?page, "navigating");
        self.page = page;
    }

    pub fn submit_query(&mut self) {
        let Some(ticket) = self.chat.begin_submit() else {
            return;
        };
        let cmd = BackendCommand::AskQuestion {
            ticket: ticket.clone(),
        };
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.status = err.to_string();
            self.apply_completion(ticket, Err(QueryError::transport(err.to_string())));
        }
    }

    fn apply_completion(
        &mut self,
        ticket: PendingQuery,
        outcome: Result<LawsQueryResponse, QueryError>,
    ) {
        let disposition = self.chat.complete(ticket, outcome);
        if disposition == CompletionDisposition::Applied
            && self.chat.request_state() == RequestState::Failed
        {
            self.alert = self.chat.notice().cloned();
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::BackendUnavailable(message) => {
                self.status = message.clone();
                self.backend_error = Some(message);
            }
            UiEvent::QueryCompleted { ticket, outcome } => self.apply_completion(ticket, outcome),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.alert else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Query failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.alert = None;
        }
    }
}

impl eframe::App for LawDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        if let Some(page) = pages::show_nav(ctx, self.page) {
            self.navigate(page);
        }
        pages::show_status_bar(ctx, &self.status, self.backend_error.as_deref());

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Home => {
                if let Some(page) = pages::show_home(ui) {
                    self.navigate(page);
                }
            }
            Page::Chat => {
                if pages::show_chat(ui, &mut self.chat) == ChatAction::Submit {
                    self.submit_query();
                }
            }
            Page::Documents => pages::show_documents(ui, &self.document),
        });

        self.show_alert(ctx);

        if self.chat.request_state() == RequestState::Pending {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
