//! Row model shared by both extractors, and conversion of rows into
//! header-keyed records.

use indexmap::IndexMap;
use log::debug;

/// One parsed data row: header label to cell value, in header order.
pub type Record = IndexMap<String, String>;

/// How a cell's value was stored in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Looked up from the shared-string table.
    SharedString,
    /// Literal or inline text (also booleans, errors and dates).
    Text,
    /// Numeric cell, value kept as written.
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// 0-based column index.
    pub column: usize,
    pub value: String,
    pub kind: CellKind,
}

impl Cell {
    pub fn new(column: usize, value: impl Into<String>, kind: CellKind) -> Self {
        Self {
            column,
            value: value.into(),
            kind,
        }
    }
}

/// A sparse row: cells ordered by column, gaps read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dense row of text cells, one per value.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = values
            .into_iter()
            .enumerate()
            .map(|(column, value)| Cell::new(column, value, CellKind::Text))
            .collect();
        Self { cells }
    }

    /// Row from cells in any order.
    ///
    /// Cells are sorted by column once; when a column appears more than once
    /// the cell that came last wins.
    pub fn from_cells(mut cells: Vec<Cell>) -> Self {
        cells.reverse();
        cells.sort_by_key(|c| c.column);
        cells.dedup_by_key(|c| c.column);
        Self { cells }
    }

    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.cells
            .binary_search_by_key(&column, |c| c.column)
            .ok()
            .map(|i| &self.cells[i])
    }

    /// Value at `column`, empty when the cell is absent.
    pub fn value(&self, column: usize) -> &str {
        self.get(column).map_or("", |c| c.value.as_str())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when every cell is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.value.trim().is_empty())
    }
}

/// Turns rows into records keyed by the first row's labels.
pub struct RecordBuilder {
    /// Header cell column and its label, in column order.
    columns: Vec<(usize, String)>,
}

impl RecordBuilder {
    /// Take one label per cell present in `header`, trimmed; an empty label
    /// in column `i` becomes `Column {i + 1}`. Columns with no header cell
    /// get no key.
    pub fn from_header(header: &Row) -> Self {
        let columns = header
            .cells()
            .iter()
            .map(|cell| {
                let label = match cell.value.trim() {
                    "" => format!("Column {}", cell.column + 1),
                    label => label.to_string(),
                };
                (cell.column, label)
            })
            .collect();
        Self { columns }
    }

    /// Map a data row onto the headers, or `None` for a blank row.
    ///
    /// Values are passed through untrimmed. When two headers share a label
    /// the later column's value overwrites the earlier one, keeping the
    /// first label's position.
    pub fn record(&self, row: &Row) -> Option<Record> {
        if row.is_blank() {
            return None;
        }

        let mut record = Record::with_capacity(self.columns.len());
        for (column, label) in &self.columns {
            record.insert(label.clone(), row.value(*column).to_string());
        }
        Some(record)
    }

    /// Build records from all rows after the first.
    pub fn build(rows: &[Row]) -> Vec<Record> {
        let Some((header, data)) = rows.split_first() else {
            return Vec::new();
        };

        let builder = Self::from_header(header);
        let records: Vec<Record> = data.iter().filter_map(|row| builder.record(row)).collect();
        debug!(
            "{} records from {} data rows, {} columns",
            records.len(),
            data.len(),
            builder.columns.len()
        );
        records
    }
}
