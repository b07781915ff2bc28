//! Copies attribute values along confirmed mappings.

use matconv_map::read_attributes;
use matconv_model::{
    Attribute, MappingCandidate, MappingSet, MaterialDocument, PropertyValue, SchemaIntrospect,
    ValueStore,
};
use tracing::{debug, info, warn};

use crate::error::{Result, TransferError};
use crate::report::{SkipReason, TransferOutcome, TransferReport};

/// A resolved mapping bound to the schemas it converts between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    pub mapping: MappingSet,
    pub source_schema: String,
    pub target_schema: String,
    /// Attributes a converted store is switched to.
    pub target_attributes: Vec<Attribute>,
}

impl ConversionPlan {
    pub fn new<T>(mapping: MappingSet, source_schema: impl Into<String>, target: &T) -> Self
    where
        T: SchemaIntrospect + ?Sized,
    {
        Self {
            mapping,
            source_schema: source_schema.into(),
            target_schema: target.schema_name().to_string(),
            target_attributes: read_attributes(target),
        }
    }
}

pub struct TransferEngine;

impl TransferEngine {
    /// Copies every confirmed pair of `mapping` from `source` into `target`.
    ///
    /// `target` must already follow the destination schema. Pairs whose
    /// source or target attribute is absent, or holds another kind, are
    /// recorded as skipped and the transfer carries on. Outcomes keep the
    /// mapping's candidate order.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::TargetSchemaUnset`] without touching
    /// `target` when it has no schema.
    pub fn apply<S, T>(mapping: &MappingSet, source: &S, target: &mut T) -> Result<TransferReport>
    where
        S: ValueStore + ?Sized,
        T: ValueStore + ?Sized,
    {
        if target.schema_name().is_none() {
            return Err(TransferError::TargetSchemaUnset {
                store: target.label().to_string(),
            });
        }

        // All reads, texture tiling included, happen before the first write.
        let reads: Vec<_> = mapping
            .confirmed()
            .filter_map(|candidate| {
                let target_name = candidate.target_name()?;
                Some((candidate, target_name, read_source(source, candidate)))
            })
            .collect();

        let mut report = TransferReport::new(target.label());
        for (candidate, target_name, read) in reads {
            let source_name = candidate.source.name.as_str();
            let kind = candidate.source.kind;
            let outcome = match read.and_then(|value| write_target(target, target_name, value)) {
                Ok(value) => {
                    debug!(
                        source = source_name,
                        target = target_name,
                        %kind,
                        %value,
                        "attribute copied"
                    );
                    TransferOutcome::Copied {
                        source: source_name.to_string(),
                        target: target_name.to_string(),
                        value,
                    }
                }
                Err(reason) => {
                    warn!(
                        store = %report.store,
                        source = source_name,
                        target = target_name,
                        %kind,
                        %reason,
                        "attribute skipped"
                    );
                    TransferOutcome::Skipped {
                        source: source_name.to_string(),
                        target: target_name.to_string(),
                        kind,
                        reason,
                    }
                }
            };
            report.push(outcome);
        }

        info!(
            store = %report.store,
            copied = report.copied(),
            skipped = report.skipped(),
            "transfer finished"
        );
        Ok(report)
    }

    /// Converts a store to the plan's target schema, carrying mapped values over.
    ///
    /// The mapped source values are captured in a detached snapshot, the
    /// store is switched to the target schema, and the snapshot is then
    /// applied back into the store.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::SourceSchemaMismatch`] without touching the
    /// store when it does not follow the plan's source schema.
    pub fn convert_in_place<S>(plan: &ConversionPlan, store: &mut S) -> Result<TransferReport>
    where
        S: ValueStore + ?Sized,
    {
        if store.schema_name() != Some(plan.source_schema.as_str()) {
            return Err(TransferError::SourceSchemaMismatch {
                store: store.label().to_string(),
                expected: plan.source_schema.clone(),
                found: store.schema_name().map(str::to_string),
            });
        }

        let snapshot = snapshot(&plan.mapping, store, &plan.source_schema);
        debug!(
            store = store.label(),
            captured = snapshot.properties.len(),
            from = %plan.source_schema,
            to = %plan.target_schema,
            "switching schema"
        );
        store.switch_schema(&plan.target_schema, &plan.target_attributes);
        Self::apply(&plan.mapping, &snapshot, store)
    }
}

fn read_source<S>(
    source: &S,
    candidate: &MappingCandidate,
) -> std::result::Result<PropertyValue, SkipReason>
where
    S: ValueStore + ?Sized,
{
    let name = candidate.source.name.as_str();
    match source.attribute_kind(name) {
        None => Err(SkipReason::SourceMissing),
        Some(found) if found != candidate.source.kind => {
            Err(SkipReason::SourceKindMismatch { found })
        }
        Some(_) => source.read(name).ok_or(SkipReason::SourceMissing),
    }
}

fn write_target<T>(
    target: &mut T,
    name: &str,
    value: PropertyValue,
) -> std::result::Result<PropertyValue, SkipReason>
where
    T: ValueStore + ?Sized,
{
    match target.attribute_kind(name) {
        None => return Err(SkipReason::TargetMissing),
        Some(found) if found != value.kind() => {
            return Err(SkipReason::TargetKindMismatch { found });
        }
        Some(_) => {}
    }
    target
        .write(name, value.clone())
        .map_err(|error| SkipReason::WriteRejected(error.to_string()))?;
    Ok(value)
}

/// Detached copy of every mapped source value the store currently holds.
fn snapshot<S>(mapping: &MappingSet, store: &S, schema: &str) -> MaterialDocument
where
    S: ValueStore + ?Sized,
{
    let mut document = MaterialDocument::new(store.label());
    document.schema = Some(schema.to_string());
    for candidate in mapping.confirmed() {
        if let Some(value) = store.read(&candidate.source.name) {
            document
                .properties
                .insert(candidate.source.name.clone(), value);
        }
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use matconv_model::CanonicalType;

    #[test]
    fn unset_target_schema_is_refused() {
        let mapping = MappingSet::new(vec![MappingCandidate::new(
            Attribute::new("_Cutoff", CanonicalType::Scalar),
            ["_AlphaClip".to_string()],
        )])
        .select("_Cutoff", CanonicalType::Scalar, 1)
        .expect("select");
        let source = MaterialDocument::new("Leaf").with_value("_Cutoff", PropertyValue::Scalar(0.5));
        let mut target =
            MaterialDocument::new("Leaf").with_value("_AlphaClip", PropertyValue::Scalar(0.0));

        let error = TransferEngine::apply(&mapping, &source, &mut target).expect_err("refused");
        assert_eq!(
            error,
            TransferError::TargetSchemaUnset {
                store: "Leaf".to_string()
            }
        );
        assert_eq!(target.scalar("_AlphaClip"), Some(0.0));
    }
}
