//! Attribute matching for material conversion.
//!
//! - **tokens**: attribute-name tokenizer
//! - **classify**: raw property types to canonical kinds
//! - **catalog**: typed, sorted mapping-candidate table for two schemas
//! - **score**: name-similarity priority for one source/candidate pair
//! - **engine**: auto-match over a whole mapping set
//! - **preset**: preset save/replay
//! - **repository**: JSON preset files on disk

#![deny(unsafe_code)]

pub mod catalog;
pub mod classify;
pub mod engine;
pub mod error;
pub mod preset;
pub mod repository;
pub mod score;
pub mod tokens;

pub use catalog::CatalogBuilder;
pub use classify::{classify, read_attributes};
pub use engine::{MappingResolver, Proposal};
pub use error::{CatalogError, RepositoryError};
pub use preset::{PresetCodec, PresetLoad, UnresolvedPresetEntry, UnresolvedReason};
pub use repository::{PresetMetadata, PresetRepository, StoredPreset, preset_file_name};
pub use score::{MatchPriority, score};
pub use tokens::tokenize;
