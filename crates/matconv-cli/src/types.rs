use std::path::PathBuf;

use matconv_map::{Proposal, UnresolvedPresetEntry};
use matconv_model::MappingSet;
use matconv_transfer::BatchReport;

#[derive(Debug)]
pub struct CatalogResult {
    pub source_schema: String,
    pub target_schema: String,
    pub mapping: MappingSet,
    /// Auto-match decisions, empty unless auto-match ran.
    pub proposals: Vec<Proposal>,
}

#[derive(Debug)]
pub struct PresetSaveResult {
    pub path: PathBuf,
    pub pairs: usize,
}

/// A material file that could not take part in a conversion.
#[derive(Debug)]
pub struct MaterialFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug)]
pub struct ConvertResult {
    pub batch: BatchReport,
    /// Preset pairs that no longer fit the schemas.
    pub unresolved: Vec<UnresolvedPresetEntry>,
    /// Material files left out of the batch because they could not be read
    /// or do not match their schema.
    pub rejected: Vec<MaterialFailure>,
    /// Material files rewritten; empty on a dry run.
    pub written: Vec<PathBuf>,
    /// Converted materials whose file could not be written back.
    pub write_failures: Vec<MaterialFailure>,
    pub dry_run: bool,
}

impl ConvertResult {
    pub fn has_errors(&self) -> bool {
        self.batch.failed() > 0 || !self.rejected.is_empty() || !self.write_failures.is_empty()
    }
}
