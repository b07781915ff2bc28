//! Property tests for catalog and resolver invariants.

use matconv_map::{CatalogBuilder, MappingResolver, tokenize};
use matconv_model::{Attribute, CanonicalType, MappingOption};
use proptest::prelude::*;

fn kind() -> impl Strategy<Value = CanonicalType> {
    prop::sample::select(CanonicalType::ALL.to_vec())
}

fn attribute() -> impl Strategy<Value = Attribute> {
    ("_?[A-Z][a-z]{1,6}([A-Z][a-z]{1,6}){0,2}", kind())
        .prop_map(|(name, kind)| Attribute::new(name, kind))
}

proptest! {
    #[test]
    fn catalog_invariants_hold(
        source in prop::collection::vec(attribute(), 1..12),
        target in prop::collection::vec(attribute(), 1..12),
    ) {
        let set = CatalogBuilder::build(&source, &target);
        prop_assert_eq!(set.len(), source.len());
        for candidate in &set {
            prop_assert_eq!(&candidate.options[0], &MappingOption::None);
            prop_assert_eq!(candidate.selected, 0);
            prop_assert!(!candidate.confirmed);
            let names: Vec<&str> = candidate.targets().map(|(_, name)| name).collect();
            prop_assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
            for option in &candidate.options[1..] {
                match option {
                    MappingOption::Target { kind, .. } => {
                        prop_assert_eq!(*kind, candidate.source.kind);
                        prop_assert!(kind.is_mappable());
                    }
                    MappingOption::None => prop_assert!(false, "sentinel past index 0"),
                }
            }
        }
        let keys: Vec<(&str, &str)> = set
            .iter()
            .map(|c| (c.source.kind.as_str(), c.source.name.as_str()))
            .collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn auto_match_is_idempotent(
        source in prop::collection::vec(attribute(), 1..12),
        target in prop::collection::vec(attribute(), 1..12),
    ) {
        let once = MappingResolver::auto_match(&CatalogBuilder::build(&source, &target));
        let twice = MappingResolver::auto_match(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn tokens_are_lowercase_and_non_empty(name in "[A-Za-z_]{0,24}") {
        for token in tokenize(&name) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains('_'));
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }
}
