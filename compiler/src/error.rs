use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructGenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file open failed: {path}: {source}")]
    OutputOpen {
        path:   String,
        source: std::io::Error,
    },

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("not found {{{0}}}")]
    MissingField(String),

    #[error("Invalid value for {key}: {msg}")]
    InvalidValue {
        key: String,
        msg: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
