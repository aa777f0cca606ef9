//! Client side of the food nutrition explorer: the catalog HTTP client and the
//! cascading selection controller that decides what to fetch next.

use anyhow::{Context, Result};

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod executor;
pub mod render;
pub mod selection;

pub use catalog::{HttpCatalog, RemoteCatalog};
pub use config::{load_settings, load_settings_from, Settings, SettingsError, SETTINGS_FILE};
pub use controller::{
    CatalogPayload, CatalogQuery, Disposition, FetchCompletion, FetchRequest, RequestTicket,
    SelectionController, Slot, SlotStatus,
};
pub use error::{FetchError, FetchOutcome};
pub use executor::{execute, settle};
pub use render::{ResultsTable, ResultsView, MISSING_CELL, NO_DATA_MESSAGE};
pub use selection::{Field, OptionLists, Selection, Stage};

/// Builds the HTTP catalog described by `settings`.
pub fn build_catalog(settings: &Settings) -> Result<HttpCatalog> {
    let base_url = settings
        .server_base_url()
        .context("catalog server url is not usable")?;
    match settings.request_timeout() {
        Some(timeout) => HttpCatalog::with_timeout(base_url, timeout)
            .context("failed to build catalog http client"),
        None => Ok(HttpCatalog::new(base_url)),
    }
}
