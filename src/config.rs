//! Defaults applied by [`TableQuery`](crate::query::TableQuery) and the CLI.
//!
//! ```rust
//! use triplequery::{Direction, QueryConfig, SearchMethod};
//!
//! let cfg = QueryConfig::from_json_str(r#"{ "direction": "out", "close_cutoff": 0.8 }"#)?;
//! assert_eq!(cfg.direction, Direction::Out);
//! assert_eq!(cfg.search_method, SearchMethod::Exact);
//! # Ok::<(), triplequery::TripleError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    api::{Direction, RDF_TYPE, SearchMethod},
    errors::TripleError,
    similarity::DEFAULT_CLOSE_CUTOFF,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Relation stating an entity's type. **Default:** `rdf:type`
    pub type_relation: String,
    /// Minimum similarity for close-match search. **Default:** `0.6`
    pub close_cutoff: f64,
    pub search_method: SearchMethod,
    pub direction: Direction,
    /// Drop triples linking a neighbor back to the queried entity. **Default:** `true`
    pub filter_self: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            type_relation: RDF_TYPE.to_string(),
            close_cutoff: DEFAULT_CLOSE_CUTOFF,
            search_method: SearchMethod::default(),
            direction: Direction::default(),
            filter_self: true,
        }
    }
}

impl QueryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, TripleError> {
        let config: QueryConfig = serde_json::from_str(json)
            .map_err(|e| TripleError::invalid_input(format!("bad config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TripleError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TripleError::load(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), TripleError> {
        if !(0.0..=1.0).contains(&self.close_cutoff) {
            return Err(TripleError::invalid_input(format!(
                "close_cutoff must be within 0.0..=1.0, got {}",
                self.close_cutoff
            )));
        }
        if self.type_relation.trim().is_empty() {
            return Err(TripleError::invalid_input("type_relation must be set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_defaults() {
        let cfg = QueryConfig::default();
        assert_eq!(cfg.type_relation, RDF_TYPE);
        assert_eq!(cfg.close_cutoff, 0.6);
        assert_eq!(cfg.direction, Direction::Both);
        assert!(cfg.filter_self);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = QueryConfig::from_json_str(r#"{"filter_self": false}"#).unwrap();
        assert!(!cfg.filter_self);
        assert_eq!(cfg.type_relation, RDF_TYPE);
    }

    #[test]
    fn rejects_bad_cutoff_and_unknown_direction() {
        assert!(QueryConfig::from_json_str(r#"{"close_cutoff": 2.0}"#).is_err());
        assert!(QueryConfig::from_json_str(r#"{"direction": "sideways"}"#).is_err());
        assert!(QueryConfig::from_json_str(r#"{"type_relation": " "}"#).is_err());
    }
}
