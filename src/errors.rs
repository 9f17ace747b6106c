use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TripleError {
    #[error("cannot perform action if table does not contain triples, found {found} columns")]
    Shape { found: usize },
    #[error("unknown {kind} \"{value}\", choose from {expected}")]
    InvalidEnum {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("load error: {0}")]
    Load(String),
}

impl TripleError {
    pub fn shape(found: usize) -> Self {
        TripleError::Shape { found }
    }

    pub fn invalid_enum<T: Into<String>>(
        kind: &'static str,
        value: T,
        expected: &'static str,
    ) -> Self {
        TripleError::InvalidEnum {
            kind,
            value: value.into(),
            expected,
        }
    }

    pub fn unknown_column<T: Into<String>>(name: T) -> Self {
        TripleError::UnknownColumn(name.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        TripleError::InvalidInput(msg.into())
    }

    pub fn load<T: Into<String>>(msg: T) -> Self {
        TripleError::Load(msg.into())
    }
}
