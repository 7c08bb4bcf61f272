use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("record set in {} is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    /// A stat line matched but one of its numbers did not parse.
    #[error("line {line}: cannot parse {field} value {value:?} as a number")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("invalid pattern: {0}")]
    Pattern(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
