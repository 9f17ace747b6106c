//! Filters and neighborhood queries over triple tables.
//!
//! Every operation validates that each table argument has exactly three
//! columns before reading it. Columns are addressed by position: head,
//! relation, tail.

use std::{fmt, str::FromStr};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::TripleError,
    guard::check_triples,
    similarity::{self, DEFAULT_CLOSE_CUTOFF},
    table::{Column, HEAD, RELATION, TAIL, Table},
};

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    #[default]
    Both,
}

impl Direction {
    fn includes_in(self) -> bool {
        matches!(self, Direction::In | Direction::Both)
    }

    fn includes_out(self) -> bool {
        matches!(self, Direction::Out | Direction::Both)
    }
}

impl FromStr for Direction {
    type Err = TripleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            "both" => Ok(Direction::Both),
            other => Err(TripleError::invalid_enum("direction", other, "in, out, both")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Both => "both",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    #[default]
    Exact,
    Substring,
    Close,
}

impl FromStr for SearchMethod {
    type Err = TripleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(SearchMethod::Exact),
            "substring" => Ok(SearchMethod::Substring),
            "close" => Ok(SearchMethod::Close),
            other => Err(TripleError::invalid_enum(
                "search method",
                other,
                "exact, substring, close",
            )),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchMethod::Exact => "exact",
            SearchMethod::Substring => "substring",
            SearchMethod::Close => "close",
        };
        f.write_str(name)
    }
}

/// Ids to select: one value, or a set of values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<'a> {
    One(&'a str),
    Many(Vec<&'a str>),
}

impl<'a> Selection<'a> {
    fn normalize(self) -> Self {
        match self {
            Selection::Many(ids) if ids.len() == 1 => Selection::One(ids[0]),
            other => other,
        }
    }
}

impl<'a> From<&'a str> for Selection<'a> {
    fn from(id: &'a str) -> Self {
        Selection::One(id)
    }
}

impl<'a> From<&'a String> for Selection<'a> {
    fn from(id: &'a String) -> Self {
        Selection::One(id.as_str())
    }
}

impl<'a> From<Vec<&'a str>> for Selection<'a> {
    fn from(ids: Vec<&'a str>) -> Self {
        Selection::Many(ids)
    }
}

impl<'a, 'b> From<&'b [&'a str]> for Selection<'a> {
    fn from(ids: &'b [&'a str]) -> Self {
        Selection::Many(ids.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Selection<'a> {
    fn from(ids: [&'a str; N]) -> Self {
        Selection::Many(ids.to_vec())
    }
}

impl<'a, 'b, const N: usize> From<&'b [&'a str; N]> for Selection<'a> {
    fn from(ids: &'b [&'a str; N]) -> Self {
        Selection::Many(ids.to_vec())
    }
}

impl<'a> From<&'a [String]> for Selection<'a> {
    fn from(ids: &'a [String]) -> Self {
        Selection::Many(ids.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Selection<'a> {
    fn from(ids: &'a Vec<String>) -> Self {
        Selection::from(ids.as_slice())
    }
}

/// Removes datatype tags and surrounding quotes from attribute values.
///
/// Every tail becomes a string: missing values turn into `""`, typed
/// literals into their textual form, and `"'x'^^tag"` into `x`. The table is
/// modified in place and handed back for chaining.
pub fn clean(table: &mut Table) -> Result<&mut Table, TripleError> {
    check_triples(&[&*table])?;
    for cell in table.column_cells_mut(TAIL) {
        let cleaned = clean_literal(&literal_text(cell));
        *cell = Value::String(cleaned);
    }
    debug!(rows = table.len(), "cleaned attribute values");
    Ok(table)
}

fn literal_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

fn clean_literal(text: &str) -> String {
    let value = text.rsplit_once("^^").map_or(text, |(value, _)| value);
    let quoted = ['"', '\'']
        .iter()
        .any(|quote| value.starts_with(*quote) && value.ends_with(*quote));
    if !quoted {
        return value.to_string();
    }
    if value.len() < 2 {
        return String::new();
    }
    value[1..value.len() - 1].to_string()
}

/// Rows whose `column` holds the queried id, or one of the queried ids.
pub fn select<'a>(
    table: &Table,
    query: impl Into<Selection<'a>>,
    column: Column,
) -> Result<Table, TripleError> {
    check_triples(&[table])?;
    let pos = column.position();
    let selected = match query.into().normalize() {
        Selection::One(id) => select_eq(table, pos, id),
        Selection::Many(ids) => {
            let lookup: AHashSet<&str> = ids.into_iter().collect();
            table.filter(|cells| text_of(cells, pos).is_some_and(|v| lookup.contains(v)))
        }
    };
    debug!(
        column = column.name(),
        rows = table.len(),
        matched = selected.len(),
        "select"
    );
    Ok(selected)
}

pub fn select_rel(table: &Table, relation: &str) -> Result<Table, TripleError> {
    check_triples(&[table])?;
    let selected = select_eq(table, RELATION, relation);
    debug!(relation, matched = selected.len(), "select_rel");
    Ok(selected)
}

/// Rows stating that the head is of `wanted_type` via `type_relation`.
pub fn select_by_type(
    table: &Table,
    wanted_type: &str,
    type_relation: &str,
) -> Result<Table, TripleError> {
    check_triples(&[table])?;
    let selected = table.filter(|cells| {
        text_of(cells, RELATION) == Some(type_relation) && text_of(cells, TAIL) == Some(wanted_type)
    });
    debug!(wanted_type, matched = selected.len(), "select_by_type");
    Ok(selected)
}

pub fn search(table: &Table, query: &str, method: SearchMethod) -> Result<Table, TripleError> {
    search_with_cutoff(table, query, method, DEFAULT_CLOSE_CUTOFF)
}

/// Like [`search`], with an explicit similarity cutoff for [`SearchMethod::Close`].
pub fn search_with_cutoff(
    table: &Table,
    query: &str,
    method: SearchMethod,
    cutoff: f64,
) -> Result<Table, TripleError> {
    check_triples(&[table])?;
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(TripleError::invalid_input(format!(
            "close-match cutoff must be within 0.0..=1.0, got {cutoff}"
        )));
    }
    let found = match method {
        SearchMethod::Exact => select_eq(table, TAIL, query),
        SearchMethod::Substring => {
            table.filter(|cells| text_of(cells, TAIL).is_some_and(|v| v.contains(query)))
        }
        SearchMethod::Close => table.filter(|cells| {
            text_of(cells, TAIL).is_some_and(|v| similarity::is_close(query, v, cutoff))
        }),
    };
    debug!(%method, rows = table.len(), matched = found.len(), "search");
    Ok(found)
}

/// Ids one hop away from `entity` in the given direction.
pub fn neighbor_set(
    table: &Table,
    entity: &str,
    direction: Direction,
) -> Result<AHashSet<String>, TripleError> {
    check_triples(&[table])?;
    let neighbors = neighbor_ids(table, entity, direction);
    debug!(entity, %direction, neighbors = neighbors.len(), "neighbor_set");
    Ok(neighbors)
}

/// Relation triples touching the neighbors of `entity`.
///
/// Triples whose head is a neighbor come first, then triples whose tail is a
/// neighbor, each group in table order. A triple in both groups appears
/// twice. With `filter_self`, triples linking a neighbor back to `entity`
/// are dropped.
pub fn neighbor_rel_triples(
    table: &Table,
    entity: &str,
    direction: Direction,
    filter_self: bool,
) -> Result<Table, TripleError> {
    check_triples(&[table])?;
    let neighbors = neighbor_ids(table, entity, direction);
    let head_group = table.filter(|cells| {
        text_of(cells, HEAD).is_some_and(|v| neighbors.contains(v))
            && !(filter_self && text_of(cells, TAIL) == Some(entity))
    });
    let tail_group = table.filter(|cells| {
        text_of(cells, TAIL).is_some_and(|v| neighbors.contains(v))
            && !(filter_self && text_of(cells, HEAD) == Some(entity))
    });
    let triples = head_group.concat(tail_group);
    debug!(
        entity,
        %direction,
        filter_self,
        neighbors = neighbors.len(),
        matched = triples.len(),
        "neighbor_rel_triples"
    );
    Ok(triples)
}

/// Attribute triples describing the neighbors of `entity` in `rel_table`.
pub fn neighbor_attr_triples(
    rel_table: &Table,
    attr_table: &Table,
    entity: &str,
    direction: Direction,
) -> Result<Table, TripleError> {
    check_triples(&[rel_table, attr_table])?;
    let neighbors = neighbor_ids(rel_table, entity, direction);
    let triples =
        attr_table.filter(|cells| text_of(cells, HEAD).is_some_and(|v| neighbors.contains(v)));
    debug!(
        entity,
        %direction,
        neighbors = neighbors.len(),
        matched = triples.len(),
        "neighbor_attr_triples"
    );
    Ok(triples)
}

fn neighbor_ids(table: &Table, entity: &str, direction: Direction) -> AHashSet<String> {
    let mut neighbors = AHashSet::new();
    for cells in table.rows() {
        if direction.includes_in() && text_of(cells, TAIL) == Some(entity) {
            if let Some(head) = text_of(cells, HEAD) {
                neighbors.insert(head.to_string());
            }
        }
        if direction.includes_out() && text_of(cells, HEAD) == Some(entity) {
            if let Some(tail) = text_of(cells, TAIL) {
                neighbors.insert(tail.to_string());
            }
        }
    }
    neighbors
}

fn select_eq(table: &Table, pos: usize, query: &str) -> Table {
    table.filter(|cells| text_of(cells, pos) == Some(query))
}

fn text_of(cells: &[Value], pos: usize) -> Option<&str> {
    cells.get(pos).and_then(Value::as_str)
}
