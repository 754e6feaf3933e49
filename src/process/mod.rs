// src/process/mod.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

pub mod utils;

use utils::{head_text, trim_text};

/// Characters of flattened table text used for the filename head.
pub const HEAD_LENGTH: usize = 15;

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("CSS selector for tables should be valid"));
static ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("CSS selector for rows should be valid"));
static CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("CSS selector for cells should be valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Normalized prefix of the table's flattened text, used to name the CSV.
    pub content_head: String,
    /// One record per `<tr>` under the table, cells in document order.
    pub records: Vec<Vec<String>>,
}

/// Walk every `<table>` in `doc`, nested ones included, in document order.
pub fn extract_tables(doc: &Html) -> Vec<Table> {
    let tables: Vec<Table> = doc
        .select(&TABLE)
        .map(|table| {
            let text: String = table.text().collect();
            let content_head = head_text(&text, HEAD_LENGTH);
            let records = table_to_records(table);
            trace!(head = %content_head, rows = records.len(), "found table");
            Table {
                content_head,
                records,
            }
        })
        .collect();

    debug!(count = tables.len(), "extracted tables");
    tables
}

/// Turn one `<table>` into CSV records.
///
/// Every descendant `<tr>` counts, including rows of tables nested inside a
/// cell, and every descendant `<th>`/`<td>` of a row becomes a field. A row
/// without cells still yields an (empty) record.
pub fn table_to_records(table: ElementRef<'_>) -> Vec<Vec<String>> {
    table
        .select(&ROW)
        .map(|tr| {
            tr.select(&CELL)
                .map(|cell| trim_text(&cell.text().collect::<String>()))
                .collect()
        })
        .collect()
}
