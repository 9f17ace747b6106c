use tracing::warn;

use crate::{errors::TripleError, table::Table, table::TRIPLE_WIDTH};

/// Fails unless every table has exactly three columns.
pub fn check_triples(tables: &[&Table]) -> Result<(), TripleError> {
    for table in tables {
        let found = table.width();
        if found != TRIPLE_WIDTH {
            warn!(found, "table does not contain triples");
            return Err(TripleError::shape(found));
        }
    }
    Ok(())
}
