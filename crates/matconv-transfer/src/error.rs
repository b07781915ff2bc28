use thiserror::Error;

/// Precondition failures that stop a transfer before any value is written.
///
/// Problems with individual attributes are never errors; they are recorded
/// as skipped outcomes in the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("target store {store} has no schema assigned")]
    TargetSchemaUnset { store: String },

    #[error(
        "store {store} follows schema {}, expected {expected}",
        found.as_deref().unwrap_or("<none>")
    )]
    SourceSchemaMismatch {
        store: String,
        expected: String,
        found: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TransferError>;
