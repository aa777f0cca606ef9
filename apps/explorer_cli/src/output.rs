//! Terminal rendering of option lists and the results table.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use client_core::{Field, ResultsTable, NO_DATA_MESSAGE};

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Lists the choices of `field` as value/label pairs.
pub fn options_table(field: Field, choices: &[(String, String)]) -> Table {
    let mut table = new_table();
    table.set_header(vec![header_cell("Value"), header_cell(field.label())]);
    for (value, label) in choices {
        table.add_row(vec![Cell::new(value), Cell::new(label)]);
    }
    table
}

pub fn results_table(results: &ResultsTable) -> Table {
    let mut table = new_table();
    table.set_header(results.headers.iter().map(|header| header_cell(header)));
    for row in &results.rows {
        table.add_row(row.iter().map(Cell::new));
    }
    table
}

pub fn print_options(field: Field, choices: &[(String, String)]) {
    if choices.is_empty() {
        println!("No {} available.", field.label());
        return;
    }
    println!("{}", options_table(field, choices));
}

pub fn print_results(title: &str, results: Option<&ResultsTable>) {
    match results {
        Some(results) => {
            println!("{title}");
            println!("{}", results_table(results));
        }
        None => println!("{NO_DATA_MESSAGE}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_table_lists_value_and_label() {
        let choices = vec![
            ("01".to_string(), "Dairy".to_string()),
            ("02".to_string(), "Meat".to_string()),
        ];
        let rendered = options_table(Field::Category, &choices).to_string();
        assert!(rendered.contains("Dairy"));
        assert!(rendered.contains("02"));
    }

    #[test]
    fn results_table_keeps_placeholders() {
        let results = ResultsTable {
            title: "01".to_string(),
            headers: vec!["Energy".to_string(), "Protein".to_string()],
            rows: vec![vec!["61".to_string(), "N/A".to_string()]],
        };
        let rendered = results_table(&results).to_string();
        assert!(rendered.contains("Energy"));
        assert!(rendered.contains("N/A"));
    }
}
