//! Name-similarity scoring for a single source/candidate pair.
//!
//! Candidates must share at least one token with the source to be scored at
//! all. Among those, literal name relationships rank first:
//!
//! | Priority | Rule                                  |
//! |----------|---------------------------------------|
//! | 4        | names are equal                       |
//! | 3        | candidate name contains source name   |
//! | 2        | source name contains candidate name   |
//! | 1        | token overlap only                    |
//!
//! The number of shared tokens is never counted.

use std::collections::BTreeSet;
use std::fmt;

use crate::tokens::{normalize_name, tokenize};

/// Match strength of one candidate; higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchPriority {
    TokenOverlap = 1,
    SourceContainsCandidate = 2,
    CandidateContainsSource = 3,
    Exact = 4,
}

impl MatchPriority {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Exact => "exact name",
            Self::CandidateContainsSource => "candidate contains source",
            Self::SourceContainsCandidate => "source contains candidate",
            Self::TokenOverlap => "shared token",
        }
    }
}

impl fmt::Display for MatchPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value(), self.description())
    }
}

/// Scores `candidate` against `source`, case-insensitively.
///
/// Returns `None` when the two names share no token.
pub fn score(source: &str, candidate: &str) -> Option<MatchPriority> {
    let source_tokens: BTreeSet<String> = tokenize(source).into_iter().collect();
    let candidate_tokens: BTreeSet<String> = tokenize(candidate).into_iter().collect();
    if source_tokens.is_disjoint(&candidate_tokens) {
        return None;
    }

    let source_name = normalize_name(source);
    let candidate_name = normalize_name(candidate);
    let priority = if candidate_name == source_name {
        MatchPriority::Exact
    } else if candidate_name.contains(&source_name) {
        MatchPriority::CandidateContainsSource
    } else if source_name.contains(&candidate_name) {
        MatchPriority::SourceContainsCandidate
    } else {
        MatchPriority::TokenOverlap
    };
    Some(priority)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_score_highest() {
        assert_eq!(score("_MainTex", "_MainTex"), Some(MatchPriority::Exact));
        assert_eq!(score("_MainTex", "MainTex_"), Some(MatchPriority::Exact));
        assert_eq!(MatchPriority::Exact.value(), 4);
    }

    #[test]
    fn containment_is_direction_sensitive() {
        assert_eq!(
            score("_Color", "_BaseColor"),
            Some(MatchPriority::CandidateContainsSource)
        );
        assert_eq!(
            score("_BaseColor", "_Color"),
            Some(MatchPriority::SourceContainsCandidate)
        );
    }

    #[test]
    fn token_overlap_without_containment() {
        assert_eq!(
            score("_DetailNormalMap", "_BumpMap"),
            Some(MatchPriority::TokenOverlap)
        );
    }

    #[test]
    fn no_shared_token_is_no_match() {
        assert_eq!(score("_Foo", "_Bar"), None);
        assert_eq!(score("_MainTex", "_BaseMap"), None);
    }

    #[test]
    fn substring_without_shared_token_is_excluded() {
        // "tex" is contained in "texture", but no whole token is shared.
        assert_eq!(score("_Tex", "_Texture"), None);
    }
}
