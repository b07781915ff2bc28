//! Error types for catalog construction and preset storage.

use std::path::PathBuf;

use thiserror::Error;

/// Refusal to build a catalog without both schemas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("source schema is not set")]
    MissingSourceSchema,
    #[error("target schema is not set")]
    MissingTargetSchema,
}

/// Preset repository failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// File I/O error.
    #[error("failed to {operation} {}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a readable preset.
    #[error("invalid preset file {}", path.display())]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Another schema pair already uses the same file name.
    #[error(
        "preset file {} already holds {source_schema} -> {target_schema}",
        path.display()
    )]
    NameCollision {
        path: PathBuf,
        source_schema: String,
        target_schema: String,
    },

    #[error("failed to serialize preset {source_schema} -> {target_schema}")]
    Serialization {
        source_schema: String,
        target_schema: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the preset at {}", operation, path.display()),
            Self::InvalidFormat { path, .. } => {
                format!("The file at {} is not a valid preset.", path.display())
            }
            Self::NameCollision {
                path,
                source_schema,
                target_schema,
            } => format!(
                "The preset file {} is already used by {source_schema} -> {target_schema}.",
                path.display()
            ),
            Self::Serialization {
                source_schema,
                target_schema,
                ..
            } => format!("The preset {source_schema} -> {target_schema} could not be written."),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
