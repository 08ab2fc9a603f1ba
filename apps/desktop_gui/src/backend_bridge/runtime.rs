//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{ClientSettings, HttpQueryTransport, PendingQuery, QueryTransport};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

fn build_transport(settings: &ClientSettings) -> anyhow::Result<HttpQueryTransport> {
    HttpQueryTransport::with_timeout(&settings.endpoint_url, settings.request_timeout())
        .with_context(|| format!("invalid answering service url '{}'", settings.endpoint_url))
}

/// Runs one query and hands the result to the UI. A completion is never
/// dropped for lack of queue room: the controller stays `Pending` until its
/// ticket comes back, so delivery waits for the UI to drain.
async fn answer_question<T>(transport: &T, ticket: PendingQuery, ui_tx: Sender<UiEvent>)
where
    T: QueryTransport + ?Sized,
{
    let outcome = transport.fetch_answer(ticket.query()).await;
    let event = UiEvent::QueryCompleted { ticket, outcome };
    match tokio::task::spawn_blocking(move || ui_tx.send(event)).await {
        Ok(Ok(())) => {}
        Ok(Err(_)) => tracing::debug!("ui closed before query result was delivered"),
        Err(err) => tracing::warn!("query result delivery task failed: {err}"),
    }
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: ClientSettings,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let transport = match build_transport(&settings) {
            Ok(transport) => Arc::new(transport),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err:#}"
                )));
                tracing::error!("failed to build query transport: {err:#}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Connected to answering service at {}",
                settings.endpoint_url
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::AskQuestion { ticket } => {
                        let transport = Arc::clone(&transport);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            answer_question(transport.as_ref(), ticket, ui_tx).await;
                        });
                    }
                }
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    });
}
