//! Command orchestration helpers from UI actions to backend command queue.

use client_core::FetchRequest;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; change the selection to retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend worker disconnected (possible startup/runtime failure); restart the explorer"
                    .to_string();
        }
    }
}

/// Queues every fetch the controller asked for.
pub fn dispatch_fetches(
    cmd_tx: &Sender<BackendCommand>,
    requests: Vec<FetchRequest>,
    status: &mut String,
) {
    for request in requests {
        dispatch_backend_command(cmd_tx, BackendCommand::Fetch(request), status);
    }
}
