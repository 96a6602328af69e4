use thiserror::Error;

use crate::schemas::component::Category;

/// Failure to read a tabular source, or one table inside it.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {source_name}: {source}")]
    Unreadable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("table {table} has no {column:?} column")]
    MissingColumn { table: String, column: &'static str },

    #[error("table {table} is not valid CSV: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    pub(crate) fn unreadable<S: Into<String>>(source_name: S, source: std::io::Error) -> Self {
        Self::Unreadable {
            source_name: source_name.into(),
            source,
        }
    }
}

/// A model name that is not in the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{category} model {model:?} not found")]
pub struct NotFound {
    pub category: Category,
    pub model: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    NotFound(#[from] NotFound),
}

/// An untrusted assessment reply that could not be validated.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("reply does not contain a JSON object")]
    NoJsonObject,

    #[error("reply JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("field {field} must be \"yes\" or \"no\", got {value:?}")]
    InvalidFlag { field: &'static str, value: String },
}
