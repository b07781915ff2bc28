use std::path::Path;

use anyhow::{Context, Result, bail};
use matconv_map::{
    CatalogBuilder, MappingResolver, PresetCodec, PresetMetadata, PresetRepository, StoredPreset,
};
use matconv_model::MappingSet;
use matconv_transfer::{BatchConverter, ConversionPlan};
use tracing::{info, info_span, warn};

use crate::cli::{CatalogArgs, ConvertArgs, PresetListArgs, PresetSaveArgs, SchemaPairArgs};
use crate::library::{SchemaLibrary, discover_materials, load_material, save_material};
use crate::types::{CatalogResult, ConvertResult, MaterialFailure, PresetSaveResult};

pub fn run_catalog(args: &CatalogArgs) -> Result<CatalogResult> {
    build_catalog(&args.pair)
}

pub fn run_preset_save(args: &PresetSaveArgs) -> Result<PresetSaveResult> {
    let catalog = build_catalog(&args.pair)?;
    let mut mapping = catalog.mapping;
    for (source, target) in &args.map {
        mapping = apply_manual_pair(&mapping, source, target)?;
    }

    let preset = PresetCodec::save(&mapping, &catalog.source_schema, &catalog.target_schema);
    if preset.is_empty() {
        warn!(
            source_schema = %catalog.source_schema,
            target_schema = %catalog.target_schema,
            "preset has no confirmed pairs"
        );
    }
    let mut stored = StoredPreset::new(preset);
    if let Some(description) = &args.description {
        stored = stored.with_description(description.as_str());
    }

    let repository = PresetRepository::new(&args.presets).context("open preset directory")?;
    let path = repository.save_stored(&stored).context("save preset")?;
    let pairs = stored.preset.pairs.len();
    info!(path = %path.display(), pairs, "preset written");
    Ok(PresetSaveResult { path, pairs })
}

pub fn run_preset_list(args: &PresetListArgs) -> Result<Vec<PresetMetadata>> {
    if !args.presets.is_dir() {
        bail!("preset directory {} does not exist", args.presets.display());
    }
    let repository = PresetRepository::new(&args.presets).context("open preset directory")?;
    repository.list().context("list presets")
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let library = SchemaLibrary::load(&args.schemas)?;
    let preset = PresetRepository::load_path(&args.preset)
        .with_context(|| format!("load preset {}", args.preset.display()))?
        .preset;
    let span = info_span!(
        "convert",
        source = %preset.source_schema,
        target = %preset.target_schema
    );
    let _guard = span.enter();

    let source = library.require(&preset.source_schema)?;
    let target = library.require(&preset.target_schema)?;
    let fresh = CatalogBuilder::from_schemas(Some(source), Some(target)).context("build catalog")?;
    let load = PresetCodec::load_detailed(&preset, &fresh);
    for entry in &load.unresolved {
        warn!(
            source = %entry.pair.source,
            target = %entry.pair.target,
            kind = %entry.pair.kind,
            reason = %entry.reason,
            "preset pair not applied"
        );
    }
    let plan = ConversionPlan::new(load.mapping, &preset.source_schema, target);

    let mut rejected = Vec::new();
    let candidates = match &args.all {
        Some(dir) => discover_materials(dir, &preset.source_schema)?,
        None => {
            let mut loaded = Vec::new();
            for path in &args.materials {
                match load_material(path) {
                    Ok(material) => loaded.push((path.clone(), material)),
                    Err(error) => rejected.push(reject(path, &error)),
                }
            }
            loaded
        }
    };
    let mut paths = Vec::new();
    let mut documents = Vec::new();
    for (path, material) in candidates {
        match library.validate(&material) {
            Ok(()) => {
                paths.push(path);
                documents.push(material);
            }
            Err(error) => rejected.push(reject(&path, &error)),
        }
    }

    let batch = BatchConverter::new(&plan).convert_all(documents.iter_mut());

    let mut written = Vec::new();
    let mut write_failures = Vec::new();
    if !args.dry_run {
        for ((path, document), entry) in paths.iter().zip(&documents).zip(&batch.entries) {
            if entry.result.is_err() {
                continue;
            }
            match save_material(path, document) {
                Ok(()) => written.push(path.clone()),
                Err(error) => {
                    let error = format!("{error:#}");
                    warn!(path = %path.display(), error = %error, "material not written");
                    write_failures.push(MaterialFailure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }
    }

    Ok(ConvertResult {
        batch,
        unresolved: load.unresolved,
        rejected,
        written,
        write_failures,
        dry_run: args.dry_run,
    })
}

/// Records a material left out of the batch.
fn reject(path: &Path, error: &anyhow::Error) -> MaterialFailure {
    let error = format!("{error:#}");
    warn!(path = %path.display(), error = %error, "material skipped");
    MaterialFailure {
        path: path.to_path_buf(),
        error,
    }
}

fn build_catalog(pair: &SchemaPairArgs) -> Result<CatalogResult> {
    let library = SchemaLibrary::load(&pair.schemas)?;
    let source = library.require(&pair.source)?;
    let target = library.require(&pair.target)?;

    let mut mapping =
        CatalogBuilder::from_schemas(Some(source), Some(target)).context("build catalog")?;
    if mapping.is_empty() {
        warn!(
            source_schema = %source.name,
            target_schema = %target.name,
            "catalog is empty"
        );
    }
    let mut proposals = Vec::new();
    if pair.auto_match {
        proposals = MappingResolver::propose(&mapping);
        mapping = MappingResolver::auto_match(&mapping);
    }

    Ok(CatalogResult {
        source_schema: source.name.clone(),
        target_schema: target.name.clone(),
        mapping,
        proposals,
    })
}

/// Selects `target` for the source attribute named `source`, whatever its kind.
fn apply_manual_pair(mapping: &MappingSet, source: &str, target: &str) -> Result<MappingSet> {
    let candidate = mapping
        .iter()
        .find(|c| c.source.name == source)
        .with_context(|| format!("source attribute `{source}` is not in the catalog"))?;
    mapping
        .select_target(source, candidate.source.kind, target)
        .with_context(|| format!("map {source} -> {target}"))
}
