//! UI layer for the explorer window.

pub mod app;

pub use app::{ExplorerApp, StartupConfig};
