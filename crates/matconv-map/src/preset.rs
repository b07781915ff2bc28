//! Preset save and replay.

use std::fmt;

use matconv_model::{MappingSet, Preset, PresetPair, SelectionError};
use tracing::{debug, info};

/// Why a preset pair could not be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No source attribute with this name and kind.
    MissingCandidate,
    /// The source exists but the target is not among its options.
    MissingOption,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCandidate => f.write_str("source attribute not in schema"),
            Self::MissingOption => f.write_str("target attribute not available"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedPresetEntry {
    pub pair: PresetPair,
    pub reason: UnresolvedReason,
}

/// Result of replaying a preset with the dropped entries kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetLoad {
    pub mapping: MappingSet,
    pub applied: usize,
    pub unresolved: Vec<UnresolvedPresetEntry>,
}

pub struct PresetCodec;

impl PresetCodec {
    /// Records every confirmed, non-`None` selection of `mapping`.
    pub fn save(mapping: &MappingSet, source_schema: &str, target_schema: &str) -> Preset {
        let pairs: Vec<PresetPair> = mapping
            .confirmed()
            .filter_map(|candidate| {
                Some(PresetPair {
                    source: candidate.source.name.clone(),
                    target: candidate.target_name()?.to_string(),
                    kind: candidate.source.kind,
                })
            })
            .collect();
        info!(
            source_schema,
            target_schema,
            pairs = pairs.len(),
            "preset saved"
        );
        Preset {
            source_schema: source_schema.to_string(),
            target_schema: target_schema.to_string(),
            pairs,
        }
    }

    /// Replays `preset` onto a freshly built mapping set.
    ///
    /// Pairs without a matching candidate or option are dropped.
    pub fn load(preset: &Preset, fresh: &MappingSet) -> MappingSet {
        Self::load_detailed(preset, fresh).mapping
    }

    /// Same as [`PresetCodec::load`], also returning the dropped pairs.
    pub fn load_detailed(preset: &Preset, fresh: &MappingSet) -> PresetLoad {
        let mut mapping = fresh.clone();
        let mut applied = 0usize;
        let mut unresolved = Vec::new();

        for pair in &preset.pairs {
            match mapping.select_target(&pair.source, pair.kind, &pair.target) {
                Ok(next) => {
                    mapping = next;
                    applied += 1;
                }
                Err(error) => {
                    let reason = match error {
                        SelectionError::CandidateNotFound { .. } => {
                            UnresolvedReason::MissingCandidate
                        }
                        SelectionError::OptionNotFound { .. }
                        | SelectionError::OptionOutOfRange { .. } => {
                            UnresolvedReason::MissingOption
                        }
                    };
                    debug!(
                        source = %pair.source,
                        target = %pair.target,
                        kind = %pair.kind,
                        %reason,
                        "preset pair dropped"
                    );
                    unresolved.push(UnresolvedPresetEntry {
                        pair: pair.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            source_schema = %preset.source_schema,
            target_schema = %preset.target_schema,
            applied,
            dropped = unresolved.len(),
            "preset loaded"
        );
        PresetLoad {
            mapping,
            applied,
            unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use matconv_model::{Attribute, CanonicalType, MappingCandidate};

    use super::*;

    fn fresh() -> MappingSet {
        MappingSet::new(vec![
            MappingCandidate::new(
                Attribute::new("_Color", CanonicalType::Color),
                vec!["_BaseColor".to_string()],
            ),
            MappingCandidate::new(
                Attribute::new("_Glossiness", CanonicalType::Scalar),
                vec!["_Smoothness".to_string()],
            ),
        ])
    }

    #[test]
    fn save_keeps_only_confirmed_pairs_with_bare_names() {
        let mapping = fresh()
            .select("_Color", CanonicalType::Color, 1)
            .expect("select");
        let preset = PresetCodec::save(&mapping, "Standard", "Lit");
        assert_eq!(
            preset.pairs,
            vec![PresetPair {
                source: "_Color".to_string(),
                target: "_BaseColor".to_string(),
                kind: CanonicalType::Color,
            }]
        );
    }

    #[test]
    fn unresolved_pairs_are_dropped_not_fatal() {
        let mut preset = Preset::new("Standard", "Lit");
        preset.pairs = vec![
            PresetPair {
                source: "_Glossiness".to_string(),
                target: "_Smoothness".to_string(),
                kind: CanonicalType::Scalar,
            },
            PresetPair {
                source: "_Metallic".to_string(),
                target: "_Metallic".to_string(),
                kind: CanonicalType::Scalar,
            },
            PresetPair {
                source: "_Color".to_string(),
                target: "_TintColor".to_string(),
                kind: CanonicalType::Color,
            },
            PresetPair {
                source: "_Color".to_string(),
                target: "_BaseColor".to_string(),
                kind: CanonicalType::Vector,
            },
        ];

        let load = PresetCodec::load_detailed(&preset, &fresh());
        assert_eq!(load.applied, 1);
        let reasons: Vec<UnresolvedReason> = load.unresolved.iter().map(|u| u.reason).collect();
        assert_eq!(
            reasons,
            vec![
                UnresolvedReason::MissingCandidate,
                UnresolvedReason::MissingOption,
                UnresolvedReason::MissingCandidate,
            ]
        );
        let glossiness = load
            .mapping
            .get("_Glossiness", CanonicalType::Scalar)
            .expect("candidate");
        assert_eq!(glossiness.target_name(), Some("_Smoothness"));
        assert_eq!(
            load.mapping
                .get("_Color", CanonicalType::Color)
                .and_then(MappingCandidate::target_name),
            None
        );
    }
}
