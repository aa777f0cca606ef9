mod output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    build_catalog, load_settings, load_settings_from, settle, Field, ResultsView,
    SelectionController, Slot, SlotStatus,
};
use tracing_subscriber::EnvFilter;

/// Walks the catalog one selector at a time. Prints the choices of the first
/// selector left unset, or the results table once a column is chosen.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    food_name: Option<String>,
    /// Table identifier as listed by the tables step.
    #[arg(long)]
    table: Option<String>,
    #[arg(long)]
    sub: Option<String>,
    #[arg(long)]
    column: Option<String>,
}

impl Args {
    fn chosen(&self) -> [(Field, Option<&str>); 5] {
        [
            (Field::Category, self.category.as_deref()),
            (Field::FoodName, self.food_name.as_deref()),
            (Field::Table, self.table.as_deref()),
            (Field::SubSelection, self.sub.as_deref()),
            (Field::Column, self.column.as_deref()),
        ]
    }
}

fn source_slot(field: Field) -> Slot {
    match field {
        Field::Category => Slot::Categories,
        Field::FoodName => Slot::FoodNames,
        Field::Table => Slot::Tables,
        Field::SubSelection | Field::Column => Slot::Columns,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = match &args.config {
        Some(path) => load_settings_from(path, |name| std::env::var(name).ok()),
        None => load_settings(),
    }
    .context("failed to load settings")?;
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = build_catalog(&settings)?;
    let mut controller = SelectionController::new();
    let requests = controller.initialize();
    settle(&mut controller, &catalog, requests).await;

    for (field, value) in args.chosen() {
        let Some(value) = value else {
            continue;
        };
        if controller.options().label_for(field, value).is_none() {
            tracing::warn!(field = field.label(), value, "value is not among the listed options");
        }
        let requests = controller.set_field(field, value);
        settle(&mut controller, &catalog, requests).await;
    }

    let selection = controller.selection();
    let next_unset = [Field::Category, Field::FoodName, Field::Table, Field::Column]
        .into_iter()
        .find(|field| !selection.is_set(*field));

    if let Some(field) = next_unset {
        if let SlotStatus::Failed(message) = controller.status(source_slot(field)) {
            bail!("{} unavailable: {message}", field.label());
        }
        output::print_options(field, &controller.options().choices(field));
        return Ok(());
    }

    if let SlotStatus::Failed(message) = controller.status(Slot::Rows) {
        bail!("table data unavailable: {message}");
    }
    match controller.results_view() {
        ResultsView::Table(table) => {
            let title = controller
                .options()
                .label_for(Field::Category, &table.title)
                .unwrap_or_else(|| table.title.clone());
            output::print_results(&title, Some(&table));
        }
        ResultsView::NoData => output::print_results("", None),
    }
    Ok(())
}
