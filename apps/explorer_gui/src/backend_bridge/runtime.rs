//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{build_catalog, execute, RemoteCatalog, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Every fetch runs as its own task, so
/// completions reach the UI in whatever order the server answers.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let catalog: Arc<dyn RemoteCatalog> = match build_catalog(&settings) {
            Ok(catalog) => Arc::new(catalog),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!("failed to build catalog client: {err:#}");
                return;
            }
        };

        tracing::info!(server_url = %settings.server_url, "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Using catalog at {}",
            settings.server_url
        )));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Fetch(request) => {
                    let catalog = Arc::clone(&catalog);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let ticket = request.ticket;
                        let completion = execute(catalog.as_ref(), request).await;
                        if ui_tx.try_send(UiEvent::FetchCompleted(completion)).is_err() {
                            tracing::warn!(
                                slot = ticket.slot.label(),
                                seq = ticket.seq,
                                "ui event queue unavailable; dropping fetch result"
                            );
                        }
                    });
                }
            }
        }

        tracing::info!("ui command queue closed; backend worker stopping");
    });
}
