use thiserror::Error;

/// Why a single record could not be loaded.
///
/// These are recoverable by design: the driver rolls the record back, counts
/// the failure, and moves on. Nothing here ever aborts a source, let alone
/// the run.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("line {line}: invalid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: read failed: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing required key `{0}`")]
    MissingField(&'static str),

    #[error("key `{key}` does not hold a storable scalar")]
    UnsupportedType { key: &'static str },

    #[error("key `{key}` does not hold an array of strings")]
    NotAStringArray { key: &'static str },

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}
