use serde_json::json;
use shared::domain::TableId;

use super::*;
use crate::error::FetchError;

fn single(requests: Vec<FetchRequest>) -> FetchRequest {
    assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
    requests.into_iter().next().expect("one request")
}

fn loaded(request: &FetchRequest, payload: CatalogPayload) -> FetchCompletion {
    FetchCompletion {
        ticket: request.ticket,
        outcome: FetchOutcome::Loaded(payload),
    }
}

fn failed(request: &FetchRequest, status: u16) -> FetchCompletion {
    FetchCompletion {
        ticket: request.ticket,
        outcome: FetchOutcome::Failed(FetchError::Status {
            endpoint: request.ticket.slot.label(),
            status,
        }),
    }
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn dairy() -> Vec<Category> {
    vec![Category {
        code: "01".to_string(),
        name: "Dairy".to_string(),
    }]
}

fn proximate() -> Vec<TableSummary> {
    vec![TableSummary {
        id: TableId::new("T1"),
        name: "Proximate".to_string(),
    }]
}

/// Controller with category 01, food Milk and table T1 selected and every
/// option list loaded.
fn controller_at_table() -> SelectionController {
    let mut controller = SelectionController::new();
    let categories = single(controller.initialize());
    controller.apply(loaded(&categories, CatalogPayload::Categories(dairy())));

    let foods = single(controller.set_field(Field::Category, "01"));
    controller.apply(loaded(
        &foods,
        CatalogPayload::FoodNames(names(&["Milk", "Cheese"])),
    ));

    let tables = single(controller.set_field(Field::FoodName, "Milk"));
    controller.apply(loaded(&tables, CatalogPayload::Tables(proximate())));

    let columns = single(controller.set_field(Field::Table, "T1"));
    controller.apply(loaded(
        &columns,
        CatalogPayload::Columns(names(&["Protein", "Fat"])),
    ));
    controller
}

#[test]
fn initialize_requests_categories_exactly_once() {
    let mut controller = SelectionController::new();

    let request = single(controller.initialize());
    assert_eq!(request.query, CatalogQuery::Categories);
    assert_eq!(controller.status(Slot::Categories), &SlotStatus::Loading);

    assert!(controller.initialize().is_empty());
}

#[test]
fn category_failure_leaves_list_empty_and_reports_status() {
    let mut controller = SelectionController::new();
    let request = single(controller.initialize());

    assert_eq!(controller.apply(failed(&request, 503)), Disposition::Applied);
    assert!(controller.options().categories.is_empty());
    assert!(matches!(
        controller.status(Slot::Categories),
        SlotStatus::Failed(message) if message.contains("503")
    ));

    // still interactive
    let foods = single(controller.set_field(Field::Category, "01"));
    assert_eq!(
        foods.query,
        CatalogQuery::FoodNames {
            category: "01".to_string()
        }
    );
}

#[test]
fn walks_the_chain_with_new_values() {
    let mut controller = SelectionController::new();
    let categories = single(controller.initialize());
    controller.apply(loaded(&categories, CatalogPayload::Categories(dairy())));
    assert_eq!(controller.options().categories, dairy());

    let foods = single(controller.set_field(Field::Category, "01"));
    assert_eq!(
        foods.query,
        CatalogQuery::FoodNames {
            category: "01".to_string()
        }
    );
    controller.apply(loaded(
        &foods,
        CatalogPayload::FoodNames(names(&["Milk", "Cheese"])),
    ));
    assert_eq!(controller.options().food_names, names(&["Milk", "Cheese"]));
    assert_eq!(controller.stage(), Stage::CategorySelected);

    let tables = single(controller.set_field(Field::FoodName, "Milk"));
    assert_eq!(
        tables.query,
        CatalogQuery::Tables {
            category: "01".to_string(),
            food_name: "Milk".to_string(),
        }
    );
    controller.apply(loaded(&tables, CatalogPayload::Tables(proximate())));
    assert_eq!(
        controller.options().choices(Field::Table),
        vec![("T1".to_string(), "Proximate".to_string())]
    );
    assert_eq!(controller.stage(), Stage::FoodSelected);

    let columns = single(controller.set_field(Field::Table, "T1"));
    assert_eq!(
        columns.query,
        CatalogQuery::Columns {
            category: "01".to_string(),
            food_name: "Milk".to_string(),
            table: "T1".to_string(),
        }
    );
    controller.apply(loaded(
        &columns,
        CatalogPayload::Columns(names(&["Protein", "Fat"])),
    ));
    assert_eq!(controller.stage(), Stage::TableSelected);

    let rows = single(controller.set_field(Field::Column, "Protein"));
    assert_eq!(
        rows.query,
        CatalogQuery::Rows {
            category: "01".to_string(),
            food_name: "Milk".to_string(),
            table: "T1".to_string(),
            column: "Protein".to_string(),
        }
    );
    assert_eq!(controller.stage(), Stage::ColumnSelected);
}

#[test]
fn setting_category_resets_everything_downstream() {
    let mut controller = controller_at_table();
    controller.set_field(Field::SubSelection, "Fat");
    controller.set_field(Field::Column, "Protein");

    let requests = controller.set_field(Field::Category, "02");

    let selection = controller.selection();
    assert_eq!(selection.category, "02");
    assert!(selection.food_name.is_empty());
    assert!(selection.table.is_empty());
    assert!(selection.sub_selection.is_empty());
    assert!(selection.column.is_empty());

    let options = controller.options();
    assert_eq!(options.categories, dairy());
    assert!(options.food_names.is_empty());
    assert!(options.tables.is_empty());
    assert!(options.columns.is_empty());
    assert!(controller.rows().is_empty());

    assert_eq!(single(requests).ticket.slot, Slot::FoodNames);
}

#[test]
fn setting_food_name_keeps_category_and_its_options() {
    let mut controller = controller_at_table();
    controller.set_field(Field::SubSelection, "Fat");
    controller.set_field(Field::Column, "Protein");

    let requests = controller.set_field(Field::FoodName, "Cheese");

    let selection = controller.selection();
    assert_eq!(selection.category, "01");
    assert_eq!(selection.food_name, "Cheese");
    assert!(selection.table.is_empty());
    assert!(selection.sub_selection.is_empty());
    assert!(selection.column.is_empty());

    let options = controller.options();
    assert_eq!(options.categories, dairy());
    assert_eq!(options.food_names, names(&["Milk", "Cheese"]));
    assert!(options.tables.is_empty());
    assert!(options.columns.is_empty());

    assert_eq!(single(requests).ticket.slot, Slot::Tables);
}

#[test]
fn setting_table_resets_column_only() {
    let mut controller = controller_at_table();
    controller.set_field(Field::SubSelection, "Fat");
    controller.set_field(Field::Column, "Protein");

    let requests = controller.set_field(Field::Table, "T2");

    let selection = controller.selection();
    assert_eq!(selection.food_name, "Milk");
    assert_eq!(selection.table, "T2");
    assert_eq!(selection.sub_selection, "Fat");
    assert!(selection.column.is_empty());

    let options = controller.options();
    assert_eq!(options.food_names, names(&["Milk", "Cheese"]));
    assert_eq!(options.tables, proximate());
    assert!(options.columns.is_empty());

    assert_eq!(single(requests).ticket.slot, Slot::Columns);
}

#[test]
fn sub_selection_does_not_fetch_or_cascade() {
    let mut controller = controller_at_table();

    assert!(controller.set_field(Field::SubSelection, "Fat").is_empty());
    assert_eq!(controller.selection().sub_selection, "Fat");
    assert_eq!(controller.options().columns, names(&["Protein", "Fat"]));
    assert_eq!(controller.stage(), Stage::TableSelected);
}

#[test]
fn clearing_a_field_issues_no_fetch() {
    let mut controller = controller_at_table();

    assert!(controller.set_field(Field::Column, "").is_empty());
    assert!(controller.set_field(Field::Table, "").is_empty());
    assert!(controller.options().columns.is_empty());
    assert!(controller.set_field(Field::FoodName, "").is_empty());
    assert!(controller.options().tables.is_empty());
    assert!(controller.set_field(Field::Category, "").is_empty());
    assert!(controller.options().food_names.is_empty());
    assert_eq!(controller.stage(), Stage::Empty);
}

#[test]
fn fields_without_upstream_value_are_ignored() {
    let mut controller = SelectionController::new();

    assert!(controller.set_field(Field::FoodName, "Milk").is_empty());
    assert!(controller.set_field(Field::Table, "T1").is_empty());
    assert!(controller.set_field(Field::Column, "Protein").is_empty());
    assert!(controller.set_field(Field::SubSelection, "Fat").is_empty());
    assert_eq!(controller.selection(), &Selection::default());

    controller.set_field(Field::Category, "01");
    assert!(controller.set_field(Field::Table, "T1").is_empty());
    assert!(controller.selection().table.is_empty());
}

#[test]
fn row_fetch_needs_table_and_column() {
    let mut controller = controller_at_table();

    let rows = single(controller.set_field(Field::Column, "Protein"));
    assert_eq!(rows.ticket.slot, Slot::Rows);
    assert_eq!(controller.status(Slot::Rows), &SlotStatus::Loading);

    assert!(controller.set_field(Field::Column, "").is_empty());
    assert_eq!(controller.status(Slot::Rows), &SlotStatus::Idle);
    assert!(!controller.is_current(rows.ticket));
}

#[test]
fn stale_food_names_never_overwrite_newer_category() {
    let mut controller = SelectionController::new();
    let for_x = single(controller.set_field(Field::Category, "X"));
    let for_y = single(controller.set_field(Field::Category, "Y"));

    assert_eq!(
        controller.apply(loaded(&for_y, CatalogPayload::FoodNames(names(&["Rice"])))),
        Disposition::Applied
    );
    assert_eq!(
        controller.apply(loaded(&for_x, CatalogPayload::FoodNames(names(&["Milk"])))),
        Disposition::Stale
    );
    assert_eq!(controller.options().food_names, names(&["Rice"]));
}

#[test]
fn stale_response_also_dropped_when_it_arrives_first() {
    let mut controller = SelectionController::new();
    let for_x = single(controller.set_field(Field::Category, "X"));
    let for_y = single(controller.set_field(Field::Category, "Y"));

    assert_eq!(
        controller.apply(loaded(&for_x, CatalogPayload::FoodNames(names(&["Milk"])))),
        Disposition::Stale
    );
    assert!(controller.options().food_names.is_empty());
    assert_eq!(controller.status(Slot::FoodNames), &SlotStatus::Loading);

    controller.apply(loaded(&for_y, CatalogPayload::FoodNames(names(&["Rice"]))));
    assert_eq!(controller.options().food_names, names(&["Rice"]));
    assert_eq!(controller.status(Slot::FoodNames), &SlotStatus::Ready);
}

#[test]
fn cleared_slot_discards_in_flight_response() {
    let mut controller = SelectionController::new();
    controller.set_field(Field::Category, "01");
    let tables = single(controller.set_field(Field::FoodName, "Milk"));

    controller.set_field(Field::Category, "02");

    assert_eq!(
        controller.apply(loaded(&tables, CatalogPayload::Tables(proximate()))),
        Disposition::Stale
    );
    assert!(controller.options().tables.is_empty());
}

#[test]
fn stale_failure_does_not_touch_status() {
    let mut controller = SelectionController::new();
    let old = single(controller.set_field(Field::Category, "X"));
    let current = single(controller.set_field(Field::Category, "Y"));
    controller.apply(loaded(&current, CatalogPayload::FoodNames(names(&["Rice"]))));

    assert_eq!(controller.apply(failed(&old, 500)), Disposition::Stale);
    assert_eq!(controller.status(Slot::FoodNames), &SlotStatus::Ready);
    assert_eq!(controller.options().food_names, names(&["Rice"]));
}

#[test]
fn mismatched_payload_is_rejected() {
    let mut controller = SelectionController::new();
    let foods = single(controller.set_field(Field::Category, "01"));

    assert_eq!(
        controller.apply(loaded(&foods, CatalogPayload::Columns(names(&["Protein"])))),
        Disposition::Stale
    );
    assert!(controller.options().columns.is_empty());
    assert!(controller.options().food_names.is_empty());
}

#[test]
fn empty_outcome_clears_list() {
    let mut controller = SelectionController::new();
    let foods = single(controller.set_field(Field::Category, "01"));

    controller.apply(FetchCompletion {
        ticket: foods.ticket,
        outcome: FetchOutcome::Empty,
    });
    assert!(controller.options().food_names.is_empty());
    assert_eq!(controller.status(Slot::FoodNames), &SlotStatus::Empty);
}

#[test]
fn results_table_shown_only_with_table_and_rows() {
    let mut controller = controller_at_table();
    assert_eq!(controller.results_view(), ResultsView::NoData);

    let rows = single(controller.set_field(Field::Column, "Protein"));
    controller.apply(loaded(
        &rows,
        CatalogPayload::Rows(vec![DataRow::from_iter([("Protein", json!(3.4))])]),
    ));

    let ResultsView::Table(table) = controller.results_view() else {
        panic!("expected results table");
    };
    assert_eq!(table.headers, names(&["Protein", "Fat"]));
    assert_eq!(table.rows, vec![names(&["3.4", "N/A"])]);
}

#[test]
fn rows_are_cleared_when_table_changes() {
    let mut controller = controller_at_table();
    let rows = single(controller.set_field(Field::Column, "Protein"));
    controller.apply(loaded(
        &rows,
        CatalogPayload::Rows(vec![DataRow::from_iter([("Protein", json!(3.4))])]),
    ));
    assert!(!controller.rows().is_empty());

    controller.set_field(Field::Table, "T1");

    assert!(controller.rows().is_empty());
    assert_eq!(controller.results_view(), ResultsView::NoData);
}

#[test]
fn reselecting_same_category_refetches_with_new_ticket() {
    let mut controller = SelectionController::new();
    let first = single(controller.set_field(Field::Category, "01"));
    let second = single(controller.set_field(Field::Category, "01"));

    assert_eq!(first.query, second.query);
    assert!(second.ticket.seq > first.ticket.seq);
    assert!(!controller.is_current(first.ticket));
    assert!(controller.is_current(second.ticket));
}

#[test]
fn loading_flag_tracks_outstanding_fetches() {
    let mut controller = SelectionController::new();
    assert!(!controller.is_loading());

    let categories = single(controller.initialize());
    assert!(controller.is_loading());

    controller.apply(loaded(&categories, CatalogPayload::Categories(dairy())));
    assert!(!controller.is_loading());
}
