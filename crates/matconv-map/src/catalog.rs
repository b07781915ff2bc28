//! Mapping-candidate table construction.

use std::collections::BTreeSet;

use matconv_model::{Attribute, MappingCandidate, MappingSet, SchemaIntrospect};
use tracing::debug;

use crate::classify::read_attributes;
use crate::error::CatalogError;

/// Builds the typed, sorted candidate table for a pair of schemas.
///
/// The table holds one candidate per source attribute. Each candidate's
/// options are the `None` sentinel followed by every target attribute of the
/// same kind, ascending by name. Candidates are ordered by kind name, then by
/// source name, so consumers never need to re-sort.
pub struct CatalogBuilder;

impl CatalogBuilder {
    /// Builds the table from two already classified attribute lists.
    ///
    /// Returns an empty set when either list is empty.
    pub fn build(source: &[Attribute], target: &[Attribute]) -> MappingSet {
        if source.is_empty() || target.is_empty() {
            debug!(
                source_count = source.len(),
                target_count = target.len(),
                "empty catalog"
            );
            return MappingSet::default();
        }

        let mut candidates: Vec<MappingCandidate> = source
            .iter()
            .map(|attribute| {
                let targets: BTreeSet<&str> = target
                    .iter()
                    .filter(|t| attribute.kind.is_compatible_with(t.kind))
                    .map(|t| t.name.as_str())
                    .collect();
                MappingCandidate::new(attribute.clone(), targets.into_iter().map(String::from))
            })
            .collect();

        candidates.sort_by(|left, right| {
            left.source
                .kind
                .as_str()
                .cmp(right.source.kind.as_str())
                .then_with(|| left.source.name.cmp(&right.source.name))
        });

        debug!(
            source_count = source.len(),
            target_count = target.len(),
            with_options = candidates.iter().filter(|c| c.has_targets()).count(),
            "catalog built"
        );
        MappingSet::new(candidates)
    }

    /// Reads both schemas once and builds their table.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when either schema is missing.
    pub fn from_schemas<S, T>(
        source: Option<&S>,
        target: Option<&T>,
    ) -> Result<MappingSet, CatalogError>
    where
        S: SchemaIntrospect + ?Sized,
        T: SchemaIntrospect + ?Sized,
    {
        let source = source.ok_or(CatalogError::MissingSourceSchema)?;
        let target = target.ok_or(CatalogError::MissingTargetSchema)?;
        debug!(
            source_schema = source.schema_name(),
            target_schema = target.schema_name(),
            "reading schemas"
        );
        Ok(Self::build(
            &read_attributes(source),
            &read_attributes(target),
        ))
    }
}

#[cfg(test)]
mod tests {
    use matconv_model::{CanonicalType, MappingOption, SchemaDescriptor};

    use super::*;

    fn attr(name: &str, kind: CanonicalType) -> Attribute {
        Attribute::new(name, kind)
    }

    #[test]
    fn options_are_kind_filtered_and_sorted() {
        let source = vec![attr("_Color", CanonicalType::Color)];
        let target = vec![
            attr("_EmissionColor", CanonicalType::Color),
            attr("_BaseMap", CanonicalType::Texture),
            attr("_BaseColor", CanonicalType::Color),
        ];
        let set = CatalogBuilder::build(&source, &target);
        let candidate = &set.candidates()[0];
        assert_eq!(
            candidate.options,
            vec![
                MappingOption::None,
                MappingOption::target("_BaseColor", CanonicalType::Color),
                MappingOption::target("_EmissionColor", CanonicalType::Color),
            ]
        );
    }

    #[test]
    fn candidates_sorted_by_kind_name_then_source_name() {
        let source = vec![
            attr("_MainTex", CanonicalType::Texture),
            attr("_Glossiness", CanonicalType::Scalar),
            attr("_Color", CanonicalType::Color),
            attr("_BumpScale", CanonicalType::Scalar),
        ];
        let target = vec![attr("_Smoothness", CanonicalType::Scalar)];
        let set = CatalogBuilder::build(&source, &target);
        let order: Vec<&str> = set.iter().map(|c| c.source.name.as_str()).collect();
        assert_eq!(order, vec!["_Color", "_BumpScale", "_Glossiness", "_MainTex"]);
    }

    #[test]
    fn unsupported_sources_get_only_the_sentinel() {
        let source = vec![attr("_Cull", CanonicalType::Unsupported)];
        let target = vec![attr("_Cull", CanonicalType::Unsupported)];
        let set = CatalogBuilder::build(&source, &target);
        assert_eq!(set.candidates()[0].options, vec![MappingOption::None]);
    }

    #[test]
    fn empty_schema_yields_empty_set() {
        let source = vec![attr("_Color", CanonicalType::Color)];
        assert!(CatalogBuilder::build(&source, &[]).is_empty());
        assert!(CatalogBuilder::build(&[], &source).is_empty());
    }

    #[test]
    fn missing_schema_is_a_configuration_error() {
        let schema = SchemaDescriptor::new("Standard").with_attribute("_Color", "Color");
        assert_eq!(
            CatalogBuilder::from_schemas(None::<&SchemaDescriptor>, Some(&schema)),
            Err(CatalogError::MissingSourceSchema)
        );
        assert_eq!(
            CatalogBuilder::from_schemas(Some(&schema), None::<&SchemaDescriptor>),
            Err(CatalogError::MissingTargetSchema)
        );
        assert_eq!(
            CatalogBuilder::from_schemas(Some(&schema), Some(&schema))
                .map(|set| set.len()),
            Ok(1)
        );
    }
}
