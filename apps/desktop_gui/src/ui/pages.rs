//! Page bodies and shell chrome. Each function draws one region and reports
//! the user's intent back to the app instead of mutating navigation itself.

use client_core::{
    transcript::{EMPTY_TRANSCRIPT_PROMPT, EXAMPLE_QUERIES},
    DocumentPresenter, QuerySubmissionController, RequestState,
};
use eframe::egui::{self, Color32, RichText};
use shared::domain::QueryRecord;

use crate::ui::app::Page;

const QUESTION_COLOR: Color32 = Color32::from_rgb(0x2b, 0x6c, 0xb0);
const ANSWER_COLOR: Color32 = Color32::from_rgb(0x2f, 0x85, 0x5a);
const SOURCES_COLOR: Color32 = Color32::from_rgb(0x6b, 0x46, 0xc1);
const MUTED_COLOR: Color32 = Color32::from_gray(0x71);
const CHAT_PLACEHOLDER: &str =
    "Ask about Westeros laws... (e.g., 'What are the laws about slavery?')";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    None,
    Submit,
}

pub fn show_nav(ctx: &egui::Context, current: Page) -> Option<Page> {
    let mut next = None;
    egui::TopBottomPanel::top("nav").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Westeros Legal").strong().size(18.0));
            ui.separator();
            for page in Page::ALL {
                if ui.selectable_label(current == page, page.label()).clicked() {
                    next = Some(page);
                }
            }
        });
    });
    next
}

pub fn show_status_bar(ctx: &egui::Context, status: &str, backend_error: Option<&str>) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.horizontal(|ui| match backend_error {
            Some(err) => {
                ui.colored_label(Color32::from_rgb(0xc5, 0x30, 0x30), err);
            }
            None => {
                ui.label(RichText::new(status).color(MUTED_COLOR).small());
            }
        });
    });
}

pub fn show_home(ui: &mut egui::Ui) -> Option<Page> {
    let mut next = None;
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.heading(RichText::new("Westeros Legal Research").size(32.0));
        ui.add_space(12.0);
        ui.label(
            RichText::new(
                "AI-powered legal research for the Seven Kingdoms. Ask questions about laws, \
                 get instant answers with citations, and explore the complete legal code.",
            )
            .size(16.0)
            .color(MUTED_COLOR),
        );
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if ui.button("Start New Query").clicked() {
                next = Some(Page::Chat);
            }
            if ui.button("Browse Documents").clicked() {
                next = Some(Page::Documents);
            }
        });
    });

    ui.add_space(32.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.columns(3, |columns| {
            let features = [
                (
                    "Smart Search",
                    "Natural language queries with AI-powered understanding",
                ),
                (
                    "Source Citations",
                    "Every answer includes references to specific legal sections",
                ),
                (
                    "Interactive Chat",
                    "Follow-up questions and conversation-based research",
                ),
            ];
            for (column, (title, blurb)) in columns.iter_mut().zip(features) {
                column.vertical_centered(|ui| {
                    ui.heading(title);
                    ui.label(RichText::new(blurb).color(MUTED_COLOR));
                });
            }
        });
    });
    next
}

pub fn show_chat(ui: &mut egui::Ui, controller: &mut QuerySubmissionController) -> ChatAction {
    let mut action = ChatAction::None;

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.heading("Legal Query Assistant");
            ui.label(
                RichText::new(
                    "Ask questions about Westeros laws and get AI-powered answers with citations",
                )
                .color(MUTED_COLOR),
            );
            ui.add_space(12.0);

            let pending = controller.request_state() == RequestState::Pending;
            egui::Frame::group(ui.style()).show(ui, |ui| {
                let mut draft = controller.draft().to_string();
                let input = ui.add(
                    egui::TextEdit::singleline(&mut draft)
                        .hint_text(CHAT_PLACEHOLDER)
                        .desired_width(f32::INFINITY),
                );
                if input.changed() {
                    controller.set_query_text(draft);
                }
                let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    let label = if pending { "Searching..." } else { "Ask Question" };
                    let clicked = ui
                        .add_enabled(controller.can_submit(), egui::Button::new(label))
                        .clicked();
                    if pending {
                        ui.spinner();
                    }
                    if clicked || (entered && controller.can_submit()) {
                        action = ChatAction::Submit;
                    }
                });
            });

            let history = controller.history();
            if !history.is_empty() {
                ui.add_space(12.0);
                ui.separator();
                ui.heading("Query Results");
                for record in history.all() {
                    ui.add_space(8.0);
                    show_record(ui, record);
                }
            } else if !pending {
                ui.add_space(12.0);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.label(
                            RichText::new(EMPTY_TRANSCRIPT_PROMPT)
                                .size(16.0)
                                .color(MUTED_COLOR),
                        );
                        ui.label(RichText::new("Try these examples:").small().color(MUTED_COLOR));
                        for example in EXAMPLE_QUERIES {
                            ui.label(RichText::new(format!("\"{example}\"")).color(QUESTION_COLOR));
                        }
                        ui.add_space(24.0);
                    });
                });
            }
        });

    action
}

fn show_record(ui: &mut egui::Ui, record: &QueryRecord) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Question:").strong().color(QUESTION_COLOR));
        ui.label(record.query.as_str());
        ui.add_space(6.0);
        ui.label(RichText::new("Answer:").strong().color(ANSWER_COLOR));
        ui.label(record.response.as_str());

        if record.has_citations() {
            ui.add_space(6.0);
            ui.label(RichText::new("Sources:").strong().color(SOURCES_COLOR));
            for citation in &record.citations {
                egui::Frame::group(ui.style())
                    .fill(Color32::from_gray(0xf7))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            RichText::new(citation.section_label())
                                .small()
                                .color(SOURCES_COLOR),
                        );
                        ui.label(RichText::new(citation.text.as_str()).small());
                    });
            }
        }
    });
}

pub fn show_documents(ui: &mut egui::Ui, presenter: &DocumentPresenter) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.heading("Legal Documents");
            ui.label(RichText::new("Browse and view legal documents in the system").color(MUTED_COLOR));
            ui.add_space(12.0);

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.heading("Laws of the Seven Kingdoms");
                ui.label(
                    RichText::new(
                        "The complete legal code governing the Seven Kingdoms, including laws on \
                         peace, religion, trials, taxes, and more.",
                    )
                    .color(MUTED_COLOR),
                );
                ui.add_space(8.0);
                show_document_presenter(ui, presenter);
                ui.add_space(8.0);
                ui.label(
                    RichText::new(
                        "Note: This PDF contains the complete legal code that powers the AI legal \
                         query system. You can ask questions about these laws using the \
                         \"New Conversation\" feature.",
                    )
                    .small(),
                );
            });
        });
}

fn show_document_presenter(ui: &mut egui::Ui, presenter: &DocumentPresenter) {
    let link = presenter.external_link();
    ui.vertical_centered(|ui| {
        if ui.button(link.label).clicked() {
            ui.ctx().open_url(egui::OpenUrl::new_tab(&link.href));
        }
    });

    let height = presenter.height_px().unwrap_or(600.0);
    egui::Frame::group(ui.style())
        .fill(Color32::WHITE)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(height);
            ui.vertical_centered(|ui| {
                ui.add_space(height / 3.0);
                ui.label(RichText::new(presenter.title()).strong());
                ui.label(RichText::new(presenter.inline_src()).monospace().small().color(MUTED_COLOR));
                ui.label(
                    RichText::new("This viewer cannot render the document inline.")
                        .color(MUTED_COLOR),
                );
            });
        });

    ui.label(
        RichText::new(presenter.fallback_message())
            .small()
            .color(QUESTION_COLOR),
    );
}
