use thiserror::Error;

use crate::attribute::CanonicalType;

/// Errors raised by value stores.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("attribute '{name}' does not exist on '{store}'")]
    UnknownAttribute { store: String, name: String },
    #[error("attribute '{name}' holds {expected} values, got {found}")]
    KindMismatch {
        name: String,
        expected: CanonicalType,
        found: CanonicalType,
    },
    #[error("schema declares {kind} attribute '{name}' which cannot hold a value")]
    UnsupportedAttribute { name: String, kind: CanonicalType },
}

/// Errors from editing the selection state of a mapping set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no candidate for {kind} attribute '{attribute}'")]
    CandidateNotFound {
        attribute: String,
        kind: CanonicalType,
    },
    #[error("option {index} out of range for '{attribute}' ({count} options)")]
    OptionOutOfRange {
        attribute: String,
        index: usize,
        count: usize,
    },
    #[error("'{target}' is not a {kind} option for '{attribute}'")]
    OptionNotFound {
        attribute: String,
        target: String,
        kind: CanonicalType,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
