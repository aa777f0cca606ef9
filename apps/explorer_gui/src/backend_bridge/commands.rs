//! Backend commands queued from UI to backend worker.

use client_core::FetchRequest;

pub enum BackendCommand {
    Fetch(FetchRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Fetch(request) => request.ticket.slot.label(),
        }
    }
}
