use ahash::AHashSet;

use crate::{
    api::{self, Selection},
    config::QueryConfig,
    errors::TripleError,
    table::{Column, Table},
};

/// Read-only operations on one table, with defaults taken from a [`QueryConfig`].
pub struct TableQuery<'a> {
    table: &'a Table,
    config: QueryConfig,
}

impl<'a> TableQuery<'a> {
    pub fn new(table: &'a Table, config: QueryConfig) -> Self {
        Self { table, config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn select<'q>(
        &self,
        query: impl Into<Selection<'q>>,
        column: Column,
    ) -> Result<Table, TripleError> {
        api::select(self.table, query, column)
    }

    pub fn select_rel(&self, relation: &str) -> Result<Table, TripleError> {
        api::select_rel(self.table, relation)
    }

    pub fn select_by_type(&self, wanted_type: &str) -> Result<Table, TripleError> {
        api::select_by_type(self.table, wanted_type, &self.config.type_relation)
    }

    pub fn search(&self, query: &str) -> Result<Table, TripleError> {
        api::search_with_cutoff(
            self.table,
            query,
            self.config.search_method,
            self.config.close_cutoff,
        )
    }

    pub fn neighbor_set(&self, entity: &str) -> Result<AHashSet<String>, TripleError> {
        api::neighbor_set(self.table, entity, self.config.direction)
    }

    pub fn neighbor_rel_triples(&self, entity: &str) -> Result<Table, TripleError> {
        api::neighbor_rel_triples(
            self.table,
            entity,
            self.config.direction,
            self.config.filter_self,
        )
    }

    /// Treats the wrapped table as relation triples.
    pub fn neighbor_attr_triples(
        &self,
        attr_table: &Table,
        entity: &str,
    ) -> Result<Table, TripleError> {
        api::neighbor_attr_triples(self.table, attr_table, entity, self.config.direction)
    }
}

impl Table {
    pub fn query(&self) -> TableQuery<'_> {
        TableQuery::new(self, QueryConfig::default())
    }

    pub fn query_with(&self, config: QueryConfig) -> TableQuery<'_> {
        TableQuery::new(self, config)
    }
}
