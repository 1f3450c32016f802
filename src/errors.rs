use thiserror::Error;

/// Error depicting errors that bring the ingester down
///
#[derive(Debug, Error)]
#[error("error while running ingester: {0}")]
pub struct IngesterError(pub String);
