//! Bridge between the egui thread and the async catalog client.

pub mod commands;
pub mod runtime;
