use futures::future::join_all;
use tracing::error;

use crate::{
    catalog::RemoteCatalog,
    controller::{
        CatalogPayload, CatalogQuery, Disposition, FetchCompletion, FetchRequest,
        SelectionController,
    },
    error::FetchOutcome,
};

/// Runs one request. Failures are logged here and returned as
/// `FetchOutcome::Failed`; nothing is retried.
pub async fn execute(catalog: &dyn RemoteCatalog, request: FetchRequest) -> FetchCompletion {
    let FetchRequest { ticket, query } = request;
    let outcome = match &query {
        CatalogQuery::Categories => {
            FetchOutcome::from_list(catalog.list_categories().await).map(CatalogPayload::Categories)
        }
        CatalogQuery::FoodNames { category } => {
            FetchOutcome::from_list(catalog.list_food_names(category).await)
                .map(CatalogPayload::FoodNames)
        }
        CatalogQuery::Tables {
            category,
            food_name,
        } => FetchOutcome::from_list(catalog.list_tables(category, food_name).await)
            .map(CatalogPayload::Tables),
        CatalogQuery::Columns {
            category,
            food_name,
            table,
        } => FetchOutcome::from_list(catalog.list_columns(category, food_name, table).await)
            .map(CatalogPayload::Columns),
        CatalogQuery::Rows {
            category,
            food_name,
            table,
            column,
        } => FetchOutcome::from_list(catalog.list_rows(category, food_name, table, column).await)
            .map(CatalogPayload::Rows),
    };

    if let FetchOutcome::Failed(err) = &outcome {
        error!(
            slot = ticket.slot.label(),
            seq = ticket.seq,
            "failed to fetch {}: {err}",
            ticket.slot.label()
        );
    }

    FetchCompletion { ticket, outcome }
}

/// Runs `requests` concurrently and applies every completion to `controller`.
/// Returns how many completions were applied rather than discarded as stale.
pub async fn settle(
    controller: &mut SelectionController,
    catalog: &dyn RemoteCatalog,
    requests: Vec<FetchRequest>,
) -> usize {
    let completions = join_all(
        requests
            .into_iter()
            .map(|request| execute(catalog, request)),
    )
    .await;

    completions
        .into_iter()
        .map(|completion| controller.apply(completion))
        .filter(|disposition| *disposition == Disposition::Applied)
        .count()
}

#[cfg(test)]
#[path = "tests/executor_tests.rs"]
mod tests;
