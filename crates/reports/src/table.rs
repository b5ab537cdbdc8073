use chrono::NaiveDate;
use comfy_table::Table;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single tabular value. Every query result and the pivot output are
/// expressed in these terms before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Int(i64),
    Text(String),
    Decimal(Decimal),
    Date(NaiveDate),
    Bool(bool),
    /// SQL NULL or a missing pivot grade. Renders as the empty string,
    /// never the literal word "null".
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
            Cell::Decimal(v) => write!(f, "{v}"),
            Cell::Date(v) => write!(f, "{v}"),
            Cell::Bool(v) => write!(f, "{v}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<i16> for Cell {
    fn from(v: i16) -> Self {
        Cell::Int(v.into())
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Int(v.into())
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl From<Decimal> for Cell {
    fn from(v: Decimal) -> Self {
        Cell::Decimal(v)
    }
}

impl From<NaiveDate> for Cell {
    fn from(v: NaiveDate) -> Self {
        Cell::Date(v)
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Cell::Empty,
        }
    }
}

/// Implemented by query row types so a whole result set can be assembled
/// into a [`Report`] with `Report::from_rows`.
pub trait Tabular {
    /// Column labels, in output order.
    fn headers() -> &'static [&'static str];

    /// The row values, in the same order as `headers()`.
    fn to_row(&self) -> Vec<Cell>;
}

/// A titled, column-labeled result set ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Report {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Report {
            title: Some(title.into()),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Assembles a report from a typed result set. An empty slice yields an
    /// empty table, headers only.
    pub fn from_rows<T: Tabular>(title: impl Into<String>, rows: &[T]) -> Self {
        let mut report = Report::new(title, T::headers());
        report.rows = rows.iter().map(Tabular::to_row).collect();
        report
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Renders the table body (header row, separator, aligned columns) via
    /// comfy-table. The title banner is not part of the body.
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.set_header(self.headers.clone());
        for row in &self.rows {
            table.add_row(row.iter().map(Cell::to_string));
        }
        table.to_string()
    }

    /// Prints the `=== title ===` banner followed by the rendered table.
    pub fn print(&self) {
        if let Some(title) = &self.title {
            println!("\n=== {title} ===");
        }
        println!("{}", self.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    struct SampleRow {
        id: i32,
        name: &'static str,
        note: Option<&'static str>,
    }

    impl Tabular for SampleRow {
        fn headers() -> &'static [&'static str] {
            &["id", "name", "note"]
        }

        fn to_row(&self) -> Vec<Cell> {
            vec![self.id.into(), self.name.into(), self.note.into()]
        }
    }

    #[test]
    fn empty_cell_renders_as_empty_string() {
        assert_eq!(Cell::Empty.to_string(), "");
        let from_none: Cell = Option::<i32>::None.into();
        assert_eq!(from_none, Cell::Empty);
    }

    #[test]
    fn decimal_cell_keeps_its_scale() {
        let cell = Cell::Decimal(Decimal::new(467, 2));
        assert_eq!(cell.to_string(), "4.67");
    }

    #[test]
    fn from_rows_preserves_order_and_nulls() {
        let rows = [
            SampleRow { id: 1, name: "first", note: Some("x") },
            SampleRow { id: 2, name: "second", note: None },
        ];
        let report = Report::from_rows("sample", &rows);
        assert_eq!(report.headers, vec!["id", "name", "note"]);
        assert_eq!(report.rows[1][2], Cell::Empty);
    }

    #[test]
    fn render_contains_headers_and_values() {
        let rows = [SampleRow { id: 7, name: "only", note: None }];
        let rendered = Report::from_rows("sample", &rows).render();
        assert!(rendered.contains("id"));
        assert!(rendered.contains("name"));
        assert!(rendered.contains("only"));
        assert!(!rendered.contains("null"));
    }

    #[test]
    fn empty_result_set_renders_headers_only() {
        let report = Report::from_rows::<SampleRow>("sample", &[]);
        let rendered = report.render();
        assert!(rendered.contains("note"));
        assert!(!rendered.contains('7'));
    }
}
