//! Schema and material files on disk.
//!
//! A schema directory holds one JSON file per schema, each a serialized
//! `SchemaDescriptor`. Material files are serialized `MaterialDocument`s.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use matconv_map::read_attributes;
use matconv_model::{MaterialDocument, SchemaDescriptor};
use tracing::{debug, info, warn};

/// Schemas loaded from a directory, keyed by schema name.
#[derive(Debug, Clone, Default)]
pub struct SchemaLibrary {
    schemas: BTreeMap<String, SchemaDescriptor>,
}

impl SchemaLibrary {
    pub fn load(dir: &Path) -> Result<Self> {
        let mut schemas = BTreeMap::new();
        for path in json_files(dir)? {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read schema {}", path.display()))?;
            let schema: SchemaDescriptor = serde_json::from_str(&contents)
                .with_context(|| format!("parse schema {}", path.display()))?;
            debug!(
                schema = %schema.name,
                attributes = schema.attributes.len(),
                path = %path.display(),
                "schema loaded"
            );
            if let Some(previous) = schemas.insert(schema.name.clone(), schema) {
                bail!(
                    "schema {} is defined more than once in {}",
                    previous.name,
                    dir.display()
                );
            }
        }
        info!(count = schemas.len(), dir = %dir.display(), "schemas loaded");
        Ok(Self { schemas })
    }

    pub fn get(&self, name: &str) -> Option<&SchemaDescriptor> {
        self.schemas.get(name)
    }

    /// Like [`SchemaLibrary::get`], failing with the known names listed.
    pub fn require(&self, name: &str) -> Result<&SchemaDescriptor> {
        self.get(name).with_context(|| {
            format!(
                "unknown schema `{name}` (known: {})",
                self.names().collect::<Vec<_>>().join(", ")
            )
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Checks a material against its schema, if the library knows it.
    pub fn validate(&self, material: &MaterialDocument) -> Result<()> {
        let Some(schema) = material.schema.as_deref().and_then(|name| self.get(name)) else {
            return Ok(());
        };
        material
            .validate(&read_attributes(schema))
            .with_context(|| {
                format!(
                    "material {} does not match schema {}",
                    material.name, schema.name
                )
            })
    }
}

pub fn load_material(path: &Path) -> Result<MaterialDocument> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read material {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse material {}", path.display()))
}

pub fn save_material(path: &Path, material: &MaterialDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(material)
        .with_context(|| format!("serialize material {}", material.name))?;
    fs::write(path, json).with_context(|| format!("write material {}", path.display()))
}

/// Every material in `dir` whose schema is `schema_name`.
///
/// Files that are not materials are skipped.
pub fn discover_materials(
    dir: &Path,
    schema_name: &str,
) -> Result<Vec<(PathBuf, MaterialDocument)>> {
    let mut found = Vec::new();
    for path in json_files(dir)? {
        match load_material(&path) {
            Ok(material) if material.schema.as_deref() == Some(schema_name) => {
                found.push((path, material));
            }
            Ok(material) => debug!(
                material = %material.name,
                schema = material.schema.as_deref().unwrap_or("<none>"),
                "different schema, skipped"
            ),
            Err(error) => warn!(
                path = %path.display(),
                error = %format!("{error:#}"),
                "not a material, skipped"
            ),
        }
    }
    info!(
        dir = %dir.display(),
        schema = schema_name,
        count = found.len(),
        "materials discovered"
    );
    Ok(found)
}

/// `*.json` files directly inside `dir`, sorted by path.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("read directory {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
