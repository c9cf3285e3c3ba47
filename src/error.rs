use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the catalog or the string tables.
///
/// Any of these leaves the calculator unusable for the session.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("alloy '{alloy}': component '{metal}' has an invalid range [{min}, {max}]")]
    InvalidRange {
        alloy: String,
        metal: String,
        min: f64,
        max: f64,
    },

    #[error("alloy '{alloy}' lists '{metal}' more than once")]
    RepeatedComponent { alloy: String, metal: String },

    #[error("duplicate metal id '{0}'")]
    DuplicateMetal(String),

    #[error("no language file for '{0}'")]
    UnknownLanguage(String),
}

pub type LoadResult<T> = Result<T, DataLoadError>;

/// Rejected UI input; the session state is left consistent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("unknown alloy '{0}'")]
    UnknownAlloy(String),

    #[error("'{metal}' is not a component of '{alloy}'")]
    UnknownComponent { alloy: String, metal: String },

    #[error("no alloy selected")]
    NoAlloySelected,

    #[error("quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),
}
