//! Persistence error types.

/// Errors from object-store and record-store writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The object store rejected or failed a blob write.
    #[error("{message}")]
    ObjectWrite { key: String, message: String },
    /// The record store rejected or failed an item write.
    #[error("{message}")]
    RecordWrite { id: String, message: String },
}
