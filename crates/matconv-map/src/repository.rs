//! Preset repository for persisting and reusing mapping presets.
//!
//! Presets are stored as JSON files named after their schema pair:
//! `{source}To{target}Preset.json`, with every character that is not
//! alphanumeric replaced by `_`. Distinct pairs can share a file name
//! (`A/B` and `A B`); the file records its own pair, so saving over
//! another pair's preset is refused and lookups ignore it.
//!
//! The repository supports:
//! - Saving a preset, optionally with a description
//! - Loading by schema pair or by file path
//! - Listing available presets
//! - Deleting presets

use std::fs;
use std::path::{Path, PathBuf};

use matconv_model::Preset;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RepositoryError, Result};

/// Directory-backed preset store.
#[derive(Debug, Clone)]
pub struct PresetRepository {
    base_dir: PathBuf,
}

/// Metadata about a stored preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetMetadata {
    pub source_schema: String,
    pub target_schema: String,
    pub file_path: PathBuf,
    pub pair_count: usize,
    pub description: Option<String>,
}

/// Preset with repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreset {
    #[serde(flatten)]
    pub preset: Preset,
    /// When the preset was saved (RFC 3339).
    pub saved_at: Option<String>,
    pub description: Option<String>,
    /// Version of the preset file format.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredPreset {
    pub fn new(preset: Preset) -> Self {
        Self {
            preset,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            description: None,
            version: default_version(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl PresetRepository {
    /// Opens a repository at `base_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| RepositoryError::Io {
            operation: "create",
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves a preset, stamping it with the current time.
    ///
    /// # Errors
    ///
    /// Fails if the preset cannot be serialized or written.
    pub fn save(&self, preset: &Preset) -> Result<PathBuf> {
        self.save_stored(&StoredPreset::new(preset.clone()))
    }

    /// Saves a stored preset (with metadata), replacing the pair's previous file.
    ///
    /// # Errors
    ///
    /// Fails if the file name is taken by another schema pair's preset, or if
    /// the preset cannot be serialized or written.
    pub fn save_stored(&self, stored: &StoredPreset) -> Result<PathBuf> {
        let source_schema = &stored.preset.source_schema;
        let target_schema = &stored.preset.target_schema;
        let path = self.path_for(source_schema, target_schema);
        if path.exists()
            && let Ok(existing) = Self::load_path(&path)
            && !existing.preset.is_for(source_schema, target_schema)
        {
            return Err(RepositoryError::NameCollision {
                path,
                source_schema: existing.preset.source_schema,
                target_schema: existing.preset.target_schema,
            });
        }
        let json = serde_json::to_string_pretty(stored).map_err(|source| {
            RepositoryError::Serialization {
                source_schema: stored.preset.source_schema.clone(),
                target_schema: stored.preset.target_schema.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|source| RepositoryError::Io {
            operation: "write",
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), pairs = stored.preset.pairs.len(), "preset written");
        Ok(path)
    }

    /// Loads the preset for a schema pair; `None` if none was saved.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load(&self, source_schema: &str, target_schema: &str) -> Result<Option<Preset>> {
        let stored = self.load_stored(source_schema, target_schema)?;
        Ok(stored.map(|s| s.preset))
    }

    /// Loads a stored preset (with metadata) for a schema pair.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load_stored(
        &self,
        source_schema: &str,
        target_schema: &str,
    ) -> Result<Option<StoredPreset>> {
        let path = self.path_for(source_schema, target_schema);
        if !path.exists() {
            return Ok(None);
        }
        let stored = Self::load_path(&path)?;
        if !stored.preset.is_for(source_schema, target_schema) {
            debug!(path = %path.display(), "preset file belongs to another schema pair");
            return Ok(None);
        }
        Ok(Some(stored))
    }

    /// Reads a preset file from anywhere on disk.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a preset.
    pub fn load_path(path: &Path) -> Result<StoredPreset> {
        let contents = fs::read_to_string(path).map_err(|source| RepositoryError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| RepositoryError::InvalidFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Lists presets in the repository, sorted by source then target schema.
    ///
    /// Files that are not presets are skipped.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<PresetMetadata>> {
        let read_error = |source| RepositoryError::Io {
            operation: "read",
            path: self.base_dir.clone(),
            source,
        };
        let mut metadata = Vec::new();

        for entry in fs::read_dir(&self.base_dir).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::load_path(&path) {
                Ok(stored) => metadata.push(PresetMetadata {
                    source_schema: stored.preset.source_schema,
                    target_schema: stored.preset.target_schema,
                    pair_count: stored.preset.pairs.len(),
                    description: stored.description,
                    file_path: path,
                }),
                Err(error) => debug!(path = %path.display(), %error, "skipping non-preset file"),
            }
        }

        metadata.sort_by(|a, b| {
            a.source_schema
                .cmp(&b.source_schema)
                .then_with(|| a.target_schema.cmp(&b.target_schema))
        });
        Ok(metadata)
    }

    /// Deletes the preset for a schema pair. Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or removed.
    pub fn delete(&self, source_schema: &str, target_schema: &str) -> Result<bool> {
        if self.load_stored(source_schema, target_schema)?.is_none() {
            return Ok(false);
        }
        let path = self.path_for(source_schema, target_schema);
        fs::remove_file(&path).map_err(|source| RepositoryError::Io {
            operation: "delete",
            path,
            source,
        })?;
        Ok(true)
    }

    pub fn exists(&self, source_schema: &str, target_schema: &str) -> bool {
        matches!(self.load_stored(source_schema, target_schema), Ok(Some(_)))
    }

    pub fn path_for(&self, source_schema: &str, target_schema: &str) -> PathBuf {
        self.base_dir
            .join(preset_file_name(source_schema, target_schema))
    }
}

/// Default file name for a schema pair's preset.
pub fn preset_file_name(source_schema: &str, target_schema: &str) -> String {
    format!(
        "{}To{}Preset.json",
        normalize_id(source_schema),
        normalize_id(target_schema)
    )
}

fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_replace_path_separators() {
        assert_eq!(
            preset_file_name("Legacy Shaders/Diffuse", "Universal Render Pipeline/Lit"),
            "Legacy_Shaders_DiffuseToUniversal_Render_Pipeline_LitPreset.json"
        );
    }
}
