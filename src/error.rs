use thiserror::Error;

use crate::query::QueryError;

#[derive(Debug, Error)]
pub enum TfProbeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid state document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid state document: expected a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("{failures} instance(s) are missing attribute `{attribute}`")]
    MissingAttributes { attribute: String, failures: usize },
}
