#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FstError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("truncated {context}: short read of {wanted} bytes")]
    Truncated { wanted: usize, context: &'static str },

    #[error("invalid fst: {0}")]
    Invalid(String),

    #[error("{} already exists", .0.display())]
    Exists(PathBuf),

    #[error("short copy for {}: expected {expected} bytes, copied {copied}", .path.display())]
    ShortCopy {
        path: PathBuf,
        expected: u64,
        copied: u64,
    },

    #[error("nested containers deeper than {0} levels")]
    TooDeep(usize),
}

pub type FstResult<T> = Result<T, FstError>;
