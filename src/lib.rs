//! Query helpers over head/relation/tail triple tables.
//!
//! Relation triples link entities to entities, attribute triples link
//! entities to literal values. Tables are plain in-memory [`Table`]s whose
//! first three columns are read as head, relation and tail.
//!
//! ```rust
//! use triplequery::{Direction, Table, neighbor_set};
//!
//! let rel = Table::from_triples([("e1", "rel0", "e4"), ("e5", "rel1", "e1")]);
//! let mut ids: Vec<_> = neighbor_set(&rel, "e1", Direction::Both)?.into_iter().collect();
//! ids.sort();
//! assert_eq!(ids, ["e4", "e5"]);
//! # Ok::<(), triplequery::TripleError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod fixtures;
pub mod guard;
pub mod loader;
pub mod query;
pub mod similarity;
pub mod table;

pub use crate::api::{
    Direction, RDF_TYPE, SearchMethod, Selection, clean, neighbor_attr_triples,
    neighbor_rel_triples, neighbor_set, search, search_with_cutoff, select, select_by_type,
    select_rel,
};
pub use crate::config::QueryConfig;
pub use crate::errors::TripleError;
pub use crate::query::TableQuery;
pub use crate::table::{Column, Table};
