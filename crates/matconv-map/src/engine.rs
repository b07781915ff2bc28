//! Auto-match over a mapping set.

use matconv_model::{CanonicalType, MappingCandidate, MappingSet};
use tracing::{debug, info};

use crate::score::{MatchPriority, score};

/// Best-scoring target proposed for one source attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub source: String,
    pub kind: CanonicalType,
    /// Index into the candidate's option list.
    pub index: usize,
    pub target: String,
    pub priority: MatchPriority,
}

/// Proposes a target for every source attribute by name similarity.
pub struct MappingResolver;

impl MappingResolver {
    /// Picks the highest-priority option of `candidate`.
    ///
    /// Ties keep the first option in list order, which is the alphabetically
    /// first name of the top tier. Returns `None` when no option shares a
    /// token with the source name.
    pub fn best_option(candidate: &MappingCandidate) -> Option<(usize, MatchPriority)> {
        let mut best: Option<(usize, MatchPriority)> = None;
        for (index, name) in candidate.targets() {
            let Some(priority) = score(&candidate.source.name, name) else {
                continue;
            };
            if best.is_none_or(|(_, current)| priority > current) {
                best = Some((index, priority));
            }
        }
        best
    }

    /// Lists what [`MappingResolver::auto_match`] would select, without applying it.
    pub fn propose(set: &MappingSet) -> Vec<Proposal> {
        set.iter()
            .filter_map(|candidate| {
                let (index, priority) = Self::best_option(candidate)?;
                let target = candidate.options[index].name()?.to_string();
                Some(Proposal {
                    source: candidate.source.name.clone(),
                    kind: candidate.source.kind,
                    index,
                    target,
                    priority,
                })
            })
            .collect()
    }

    /// Returns a new set with every matchable candidate set to its best option.
    ///
    /// Candidates without a surviving option are left exactly as they were,
    /// so an earlier confirmed choice is never downgraded to `None`. A
    /// confirmed choice that is not the best-scoring option is replaced.
    pub fn auto_match(set: &MappingSet) -> MappingSet {
        let mut matched = 0usize;
        let result: MappingSet = set
            .iter()
            .map(|candidate| match Self::best_option(candidate) {
                Some((index, priority)) => {
                    matched += 1;
                    debug!(
                        source = %candidate.source.name,
                        kind = %candidate.source.kind,
                        target = candidate.options[index].name().unwrap_or_default(),
                        priority = priority.value(),
                        "auto-matched"
                    );
                    MappingCandidate {
                        selected: index,
                        confirmed: true,
                        ..candidate.clone()
                    }
                }
                None => candidate.clone(),
            })
            .collect();
        info!(
            candidates = set.len(),
            matched,
            unmatched = set.len() - matched,
            "auto-match complete"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use matconv_model::Attribute;

    use super::*;

    fn candidate(source: &str, kind: CanonicalType, targets: &[&str]) -> MappingCandidate {
        MappingCandidate::new(
            Attribute::new(source, kind),
            targets.iter().map(|t| (*t).to_string()),
        )
    }

    #[test]
    fn highest_priority_wins_over_list_order() {
        let c = candidate(
            "_Color",
            CanonicalType::Color,
            &["_BaseColor", "_Color", "_EmissionColor"],
        );
        assert_eq!(
            MappingResolver::best_option(&c),
            Some((2, MatchPriority::Exact))
        );
    }

    #[test]
    fn ties_resolve_to_first_in_list() {
        let c = candidate(
            "_Color",
            CanonicalType::Color,
            &["_BaseColor", "_EmissionColor"],
        );
        assert_eq!(
            MappingResolver::best_option(&c),
            Some((1, MatchPriority::CandidateContainsSource))
        );
    }

    #[test]
    fn unmatched_candidate_keeps_prior_confirmation() {
        let c = candidate("_Glossiness", CanonicalType::Scalar, &["_Smoothness"])
            .with_selection(1)
            .expect("select");
        let set = MappingSet::new(vec![c.clone()]);
        assert_eq!(MappingResolver::auto_match(&set).candidates()[0], c);
    }

    #[test]
    fn propose_reports_target_names() {
        let set = MappingSet::new(vec![
            candidate("_BumpMap", CanonicalType::Texture, &["_BaseMap", "_BumpMap"]),
            candidate("_MainTex", CanonicalType::Texture, &["_BaseMap", "_BumpMap"]),
        ]);
        let proposals = MappingResolver::propose(&set);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].target, "_BumpMap");
        assert_eq!(proposals[0].priority, MatchPriority::Exact);
    }
}
