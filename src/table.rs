use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::TripleError;

pub const HEAD: usize = 0;
pub const RELATION: usize = 1;
pub const TAIL: usize = 2;
pub const TRIPLE_WIDTH: usize = 3;
pub const DEFAULT_COLUMNS: [&str; TRIPLE_WIDTH] = ["head", "relation", "tail"];

/// Positional role of a triple column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    #[default]
    Head,
    Relation,
    Tail,
}

impl Column {
    pub fn position(self) -> usize {
        match self {
            Column::Head => HEAD,
            Column::Relation => RELATION,
            Column::Tail => TAIL,
        }
    }

    pub fn name(self) -> &'static str {
        DEFAULT_COLUMNS[self.position()]
    }

    pub fn from_position(position: usize) -> Option<Self> {
        match position {
            HEAD => Some(Column::Head),
            RELATION => Some(Column::Relation),
            TAIL => Some(Column::Tail),
            _ => None,
        }
    }
}

impl FromStr for Column {
    type Err = TripleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(Column::Head),
            "relation" => Ok(Column::Relation),
            "tail" => Ok(Column::Tail),
            other => Err(TripleError::invalid_enum(
                "column",
                other,
                "head, relation, tail",
            )),
        }
    }
}

/// Ordered rows under named, ordered columns.
///
/// Every row carries a label (its position in the table it was first built
/// from). Filtering keeps labels, so a derived table can be traced back to
/// the rows it came from. Cells are JSON values: `Null` is a missing value,
/// strings are text, numbers and booleans are typed literals.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    index: Vec<usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<C: Into<String>>(
        columns: Vec<C>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, TripleError> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(TripleError::RowWidth {
                    row,
                    found: cells.len(),
                    expected: columns.len(),
                });
            }
        }
        let index = (0..rows.len()).collect();
        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Builds a triple table labelled `head`, `relation`, `tail`.
    pub fn from_triples<I, H, R, T>(triples: I) -> Self
    where
        I: IntoIterator<Item = (H, R, T)>,
        H: Into<Value>,
        R: Into<Value>,
        T: Into<Value>,
    {
        let rows: Vec<Vec<Value>> = triples
            .into_iter()
            .map(|(h, r, t)| vec![h.into(), r.into(), t.into()])
            .collect();
        Self {
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            index: (0..rows.len()).collect(),
            rows,
        }
    }

    /// Replaces the column labels, keeping positions.
    pub fn with_columns<C: Into<String>>(mut self, columns: Vec<C>) -> Result<Self, TripleError> {
        if columns.len() != self.columns.len() {
            return Err(TripleError::invalid_input(format!(
                "expected {} column labels, got {}",
                self.columns.len(),
                columns.len()
            )));
        }
        self.columns = columns.into_iter().map(Into::into).collect();
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row labels, parallel to [`Table::rows`].
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[Value]> {
        self.rows.get(row).map(|cells| cells.as_slice())
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Text of a cell; `None` for missing, typed or out-of-range cells.
    pub fn text(&self, row: usize, column: usize) -> Option<&str> {
        self.cell(row, column).and_then(Value::as_str)
    }

    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |cells| cells.get(column))
    }

    /// Maps a column label, or one of `head`/`relation`/`tail`, to its position.
    pub fn resolve_column(&self, name: &str) -> Result<usize, TripleError> {
        if let Some(pos) = self.columns.iter().position(|c| c == name) {
            return Ok(pos);
        }
        let pos = Column::from_str(name)
            .map_err(|_| TripleError::unknown_column(name))?
            .position();
        if pos >= self.width() {
            return Err(TripleError::unknown_column(name));
        }
        Ok(pos)
    }

    /// Rows as JSON objects keyed by column label.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|cells| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(cells.iter().cloned())
                    .collect()
            })
            .collect()
    }

    pub(crate) fn filter<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[Value]) -> bool,
    {
        let mut index = Vec::new();
        let mut rows = Vec::new();
        for (label, cells) in self.index.iter().zip(&self.rows) {
            if keep(cells) {
                index.push(*label);
                rows.push(cells.clone());
            }
        }
        Table {
            columns: self.columns.clone(),
            index,
            rows,
        }
    }

    /// Appends the rows of `other`, keeping `self`'s labels and duplicates.
    pub(crate) fn concat(mut self, other: Table) -> Table {
        self.index.extend(other.index);
        self.rows.extend(other.rows);
        self
    }

    pub(crate) fn column_cells_mut(&mut self, column: usize) -> impl Iterator<Item = &mut Value> {
        self.rows
            .iter_mut()
            .filter_map(move |cells| cells.get_mut(column))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Table::new(
            vec!["a", "b"],
            vec![vec![json!(1), json!(2)], vec![json!(3)]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TripleError::RowWidth {
                row: 1,
                found: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn resolve_column_prefers_labels() {
        let table = Table::from_triples([("e1", "r", "e2")])
            .with_columns(vec!["s", "p", "o"])
            .unwrap();
        assert_eq!(table.resolve_column("o").unwrap(), TAIL);
        assert_eq!(table.resolve_column("relation").unwrap(), RELATION);
        assert!(matches!(
            table.resolve_column("object"),
            Err(TripleError::UnknownColumn(_))
        ));
    }

    #[test]
    fn filter_keeps_row_labels() {
        let table = Table::from_triples([("e1", "r", "a"), ("e2", "r", "b"), ("e3", "r", "c")]);
        let kept = table.filter(|cells| cells[HEAD] != json!("e2"));
        assert_eq!(kept.index(), &[0, 2]);
        assert_eq!(kept.text(1, HEAD), Some("e3"));
    }

    #[test]
    fn records_use_column_labels() {
        let table = Table::from_triples([("e1", "age", json!(42))]);
        let records = table.records();
        assert_eq!(records[0]["head"], json!("e1"));
        assert_eq!(records[0]["tail"], json!(42));
    }

    #[test]
    fn column_parses_known_names_only() {
        assert_eq!("tail".parse::<Column>().unwrap(), Column::Tail);
        assert!(matches!(
            "object".parse::<Column>(),
            Err(TripleError::InvalidEnum { kind: "column", .. })
        ));
    }
}
