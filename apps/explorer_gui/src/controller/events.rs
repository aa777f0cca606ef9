//! UI/backend events and error modeling for the explorer controller.

use client_core::{FetchCompletion, Slot};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    FetchCompleted(FetchCompletion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Payload,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorCategory::Transport => "Server unreachable",
            UiErrorCategory::Server => "Server error",
            UiErrorCategory::Payload => "Unexpected response",
            UiErrorCategory::Unknown => "Request failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Fetch(Slot),
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("returned http") {
            UiErrorCategory::Server
        } else if message_lower.contains("invalid json")
            || message_lower.contains("decode")
        {
            UiErrorCategory::Payload
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("error sending request")
            || message_lower.starts_with("request to")
            || message_lower.contains("dns")
            || message_lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line summary for banners and inline hints.
    pub fn summary(&self) -> String {
        match self.context {
            UiErrorContext::BackendStartup => {
                "Backend worker startup failure; check the server URL and restart.".to_string()
            }
            UiErrorContext::Fetch(slot) => {
                format!("{}; {} unavailable", self.category.label(), slot.label())
            }
        }
    }
}
