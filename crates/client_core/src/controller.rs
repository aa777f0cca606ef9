//! Cascading selection state machine.
//!
//! `SelectionController` owns the selection, the option lists and the fetched
//! rows. Every change goes through [`SelectionController::set_field`], which
//! resets everything downstream of the changed field and returns the fetches
//! the caller must issue. Completions come back through
//! [`SelectionController::apply`] and are discarded unless their ticket is
//! still the latest one issued for their slot.

use shared::domain::{Category, DataRow, TableSummary};
use tracing::{debug, info, warn};

use crate::{
    error::FetchOutcome,
    render::{self, ResultsView},
    selection::{Field, OptionLists, Selection, Stage},
};

/// A list owned by the controller that is filled by exactly one kind of fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Categories,
    FoodNames,
    Tables,
    Columns,
    Rows,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::Categories,
        Slot::FoodNames,
        Slot::Tables,
        Slot::Columns,
        Slot::Rows,
    ];

    fn index(self) -> usize {
        match self {
            Slot::Categories => 0,
            Slot::FoodNames => 1,
            Slot::Tables => 2,
            Slot::Columns => 3,
            Slot::Rows => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::Categories => "categories",
            Slot::FoodNames => "food_names",
            Slot::Tables => "tables",
            Slot::Columns => "columns",
            Slot::Rows => "rows",
        }
    }
}

/// Identifies one issued fetch. Only the newest ticket of a slot is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub slot: Slot,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    Categories,
    FoodNames {
        category: String,
    },
    Tables {
        category: String,
        food_name: String,
    },
    Columns {
        category: String,
        food_name: String,
        table: String,
    },
    Rows {
        category: String,
        food_name: String,
        table: String,
        column: String,
    },
}

impl CatalogQuery {
    pub fn slot(&self) -> Slot {
        match self {
            CatalogQuery::Categories => Slot::Categories,
            CatalogQuery::FoodNames { .. } => Slot::FoodNames,
            CatalogQuery::Tables { .. } => Slot::Tables,
            CatalogQuery::Columns { .. } => Slot::Columns,
            CatalogQuery::Rows { .. } => Slot::Rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPayload {
    Categories(Vec<Category>),
    FoodNames(Vec<String>),
    Tables(Vec<TableSummary>),
    Columns(Vec<String>),
    Rows(Vec<DataRow>),
}

impl CatalogPayload {
    pub fn slot(&self) -> Slot {
        match self {
            CatalogPayload::Categories(_) => Slot::Categories,
            CatalogPayload::FoodNames(_) => Slot::FoodNames,
            CatalogPayload::Tables(_) => Slot::Tables,
            CatalogPayload::Columns(_) => Slot::Columns,
            CatalogPayload::Rows(_) => Slot::Rows,
        }
    }
}

/// A fetch the caller must run against a `RemoteCatalog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: RequestTicket,
    pub query: CatalogQuery,
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: RequestTicket,
    pub outcome: FetchOutcome<CatalogPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct SelectionController {
    selection: Selection,
    options: OptionLists,
    rows: Vec<DataRow>,
    sequences: [u64; 5],
    statuses: [SlotStatus; 5],
    initialized: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the category list. Only the first call issues anything.
    pub fn initialize(&mut self) -> Vec<FetchRequest> {
        if self.initialized {
            return Vec::new();
        }
        self.initialized = true;
        vec![self.issue(CatalogQuery::Categories)]
    }

    /// Sets `field` to `value`, resets the fields downstream of it and returns
    /// the fetches derived from the new values.
    ///
    /// A non-empty value for a field whose upstream field is empty is ignored.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Vec<FetchRequest> {
        let value = value.into();
        if let Some(upstream) = field.upstream() {
            if !value.is_empty() && !self.selection.is_set(upstream) {
                warn!(
                    field = field.label(),
                    upstream = upstream.label(),
                    "ignoring selection without upstream value"
                );
                return Vec::new();
            }
        }

        *self.selection.value_mut(field) = value;
        debug!(field = field.label(), value = self.selection.get(field), "selection changed");

        let mut requests = Vec::new();
        match field {
            Field::Category => {
                self.selection.food_name.clear();
                self.selection.table.clear();
                self.selection.sub_selection.clear();
                self.selection.column.clear();
                self.invalidate(&[Slot::FoodNames, Slot::Tables, Slot::Columns, Slot::Rows]);
                if let Some(query) = self.food_names_query() {
                    requests.push(self.issue(query));
                }
            }
            Field::FoodName => {
                self.selection.table.clear();
                self.selection.sub_selection.clear();
                self.selection.column.clear();
                self.invalidate(&[Slot::Tables, Slot::Columns, Slot::Rows]);
                if let Some(query) = self.tables_query() {
                    requests.push(self.issue(query));
                }
            }
            Field::Table => {
                self.selection.column.clear();
                self.invalidate(&[Slot::Columns, Slot::Rows]);
                if let Some(query) = self.columns_query() {
                    requests.push(self.issue(query));
                }
            }
            Field::SubSelection => {}
            Field::Column => {
                self.invalidate(&[Slot::Rows]);
                if let Some(query) = self.rows_query() {
                    requests.push(self.issue(query));
                }
            }
        }
        requests
    }

    /// Applies a completed fetch if its ticket is still current.
    pub fn apply(&mut self, completion: FetchCompletion) -> Disposition {
        let FetchCompletion { ticket, outcome } = completion;
        let current = self.sequences[ticket.slot.index()];
        if ticket.seq != current {
            debug!(
                slot = ticket.slot.label(),
                seq = ticket.seq,
                current,
                "discarding stale fetch result"
            );
            return Disposition::Stale;
        }

        let status = match outcome {
            FetchOutcome::Loaded(payload) if payload.slot() != ticket.slot => {
                warn!(
                    slot = ticket.slot.label(),
                    payload = payload.slot().label(),
                    "fetch result does not match its slot"
                );
                return Disposition::Stale;
            }
            FetchOutcome::Loaded(payload) => {
                self.store(payload);
                SlotStatus::Ready
            }
            FetchOutcome::Empty => {
                self.clear_slot(ticket.slot);
                SlotStatus::Empty
            }
            FetchOutcome::Failed(err) => {
                self.clear_slot(ticket.slot);
                SlotStatus::Failed(err.to_string())
            }
        };
        self.statuses[ticket.slot.index()] = status;
        Disposition::Applied
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &OptionLists {
        &self.options
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn stage(&self) -> Stage {
        self.selection.stage()
    }

    pub fn status(&self, slot: Slot) -> &SlotStatus {
        &self.statuses[slot.index()]
    }

    pub fn is_loading(&self) -> bool {
        self.statuses
            .iter()
            .any(|status| *status == SlotStatus::Loading)
    }

    /// Whether a completion carrying `ticket` would be applied.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.sequences[ticket.slot.index()] == ticket.seq
    }

    pub fn results_view(&self) -> ResultsView {
        render::results_view(&self.selection, &self.options.columns, &self.rows)
    }

    fn issue(&mut self, query: CatalogQuery) -> FetchRequest {
        let slot = query.slot();
        let seq = self.bump(slot);
        self.statuses[slot.index()] = SlotStatus::Loading;
        info!(slot = slot.label(), seq, "issuing catalog fetch");
        FetchRequest {
            ticket: RequestTicket { slot, seq },
            query,
        }
    }

    fn invalidate(&mut self, slots: &[Slot]) {
        for &slot in slots {
            self.bump(slot);
            self.clear_slot(slot);
            self.statuses[slot.index()] = SlotStatus::Idle;
        }
    }

    fn bump(&mut self, slot: Slot) -> u64 {
        let seq = &mut self.sequences[slot.index()];
        *seq += 1;
        *seq
    }

    fn clear_slot(&mut self, slot: Slot) {
        match slot {
            Slot::Categories => self.options.categories.clear(),
            Slot::FoodNames => self.options.food_names.clear(),
            Slot::Tables => self.options.tables.clear(),
            Slot::Columns => self.options.columns.clear(),
            Slot::Rows => self.rows.clear(),
        }
    }

    fn store(&mut self, payload: CatalogPayload) {
        match payload {
            CatalogPayload::Categories(categories) => self.options.categories = categories,
            CatalogPayload::FoodNames(names) => self.options.food_names = names,
            CatalogPayload::Tables(tables) => self.options.tables = tables,
            CatalogPayload::Columns(columns) => self.options.columns = columns,
            CatalogPayload::Rows(rows) => self.rows = rows,
        }
    }

    fn food_names_query(&self) -> Option<CatalogQuery> {
        let s = &self.selection;
        (!s.category.is_empty()).then(|| CatalogQuery::FoodNames {
            category: s.category.clone(),
        })
    }

    fn tables_query(&self) -> Option<CatalogQuery> {
        let s = &self.selection;
        (!s.category.is_empty() && !s.food_name.is_empty()).then(|| CatalogQuery::Tables {
            category: s.category.clone(),
            food_name: s.food_name.clone(),
        })
    }

    fn columns_query(&self) -> Option<CatalogQuery> {
        let s = &self.selection;
        (!s.food_name.is_empty() && !s.table.is_empty()).then(|| CatalogQuery::Columns {
            category: s.category.clone(),
            food_name: s.food_name.clone(),
            table: s.table.clone(),
        })
    }

    fn rows_query(&self) -> Option<CatalogQuery> {
        let s = &self.selection;
        (!s.table.is_empty() && !s.column.is_empty()).then(|| CatalogQuery::Rows {
            category: s.category.clone(),
            food_name: s.food_name.clone(),
            table: s.table.clone(),
            column: s.column.clone(),
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
