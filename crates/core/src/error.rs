/// Closed error taxonomy for domain operations.
///
/// Every handler failure is expressed as one of these variants so the HTTP
/// boundary can map them exhaustively to status codes. Conflicts map to 400
/// (not 409) per the API contract.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
