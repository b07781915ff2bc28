//! Mapping candidates and mapping sets.
//!
//! A [`MappingSet`] holds one [`MappingCandidate`] per source attribute. Every
//! stage of the workflow (catalog construction, auto-match, user edits,
//! preset replay) produces a new set instead of mutating a shared one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, CanonicalType};
use crate::error::SelectionError;

/// One selectable entry in a candidate's option list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MappingOption {
    /// Explicit "no mapping" sentinel, always at index 0.
    None,
    /// A kind-compatible attribute of the target schema.
    Target { name: String, kind: CanonicalType },
}

impl MappingOption {
    pub fn target(name: impl Into<String>, kind: CanonicalType) -> Self {
        MappingOption::Target {
            name: name.into(),
            kind,
        }
    }

    /// Bare target attribute name; `None` for the sentinel.
    pub fn name(&self) -> Option<&str> {
        match self {
            MappingOption::None => None,
            MappingOption::Target { name, .. } => Some(name),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, MappingOption::None)
    }
}

/// Display label only (`None` or `Kind | name`); never parsed back.
impl fmt::Display for MappingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingOption::None => f.write_str("None"),
            MappingOption::Target { name, kind } => write!(f, "{kind} | {name}"),
        }
    }
}

/// One source attribute plus its selectable compatible target options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingCandidate {
    pub source: Attribute,
    /// `options[0]` is always [`MappingOption::None`].
    pub options: Vec<MappingOption>,
    pub selected: usize,
    pub confirmed: bool,
}

impl MappingCandidate {
    /// Creates an unselected candidate; `targets` are placed after the sentinel as given.
    pub fn new(source: Attribute, targets: impl IntoIterator<Item = String>) -> Self {
        let kind = source.kind;
        let mut options = vec![MappingOption::None];
        options.extend(targets.into_iter().map(|name| MappingOption::target(name, kind)));
        Self {
            source,
            options,
            selected: 0,
            confirmed: false,
        }
    }

    pub fn selected_option(&self) -> &MappingOption {
        static NO_MAPPING: MappingOption = MappingOption::None;
        self.options.get(self.selected).unwrap_or(&NO_MAPPING)
    }

    /// Target name to transfer into, if the candidate is confirmed and not `None`.
    pub fn target_name(&self) -> Option<&str> {
        if self.is_mapped() {
            self.selected_option().name()
        } else {
            None
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.confirmed && self.selected != 0
    }

    /// True if at least one target option besides the sentinel exists.
    pub fn has_targets(&self) -> bool {
        self.options.len() > 1
    }

    /// Iterates the non-sentinel options with their indices.
    pub fn targets(&self) -> impl Iterator<Item = (usize, &str)> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(index, option)| option.name().map(|name| (index, name)))
    }

    pub fn option_index(&self, target: &str) -> Option<usize> {
        self.targets()
            .find(|(_, name)| *name == target)
            .map(|(index, _)| index)
    }

    /// Options whose display label contains `query`, ignoring case.
    ///
    /// An empty query returns every option.
    pub fn search_options(&self, query: &str) -> Vec<(usize, &MappingOption)> {
        let query = query.trim().to_lowercase();
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| {
                query.is_empty() || option.to_string().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Returns a copy selecting `index`. Index 0 clears the confirmation.
    ///
    /// # Errors
    ///
    /// Fails if `index` is outside the option list.
    pub fn with_selection(&self, index: usize) -> Result<Self, SelectionError> {
        if index >= self.options.len() {
            return Err(SelectionError::OptionOutOfRange {
                attribute: self.source.name.clone(),
                index,
                count: self.options.len(),
            });
        }
        Ok(Self {
            selected: index,
            confirmed: index != 0,
            ..self.clone()
        })
    }

    fn matches(&self, source: &str, kind: CanonicalType) -> bool {
        self.source.name == source && self.source.kind == kind
    }
}

/// Counts over a mapping set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingSummary {
    /// Number of source attributes.
    pub total: usize,
    /// Candidates with a confirmed, non-`None` selection.
    pub confirmed: usize,
    /// Candidates with target options but no confirmed selection.
    pub unmapped: usize,
    /// Candidates without any compatible target option.
    pub without_options: usize,
}

/// Ordered sequence of mapping candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingSet {
    candidates: Vec<MappingCandidate>,
}

impl MappingSet {
    pub fn new(candidates: Vec<MappingCandidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[MappingCandidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<MappingCandidate> {
        self.candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, source: &str, kind: CanonicalType) -> Option<&MappingCandidate> {
        self.candidates.iter().find(|c| c.matches(source, kind))
    }

    /// Candidates that will take part in a transfer.
    pub fn confirmed(&self) -> impl Iterator<Item = &MappingCandidate> {
        self.candidates.iter().filter(|c| c.is_mapped())
    }

    /// Presentation grouping by kind; order inside each group is preserved.
    pub fn groups(&self) -> BTreeMap<&'static str, Vec<&MappingCandidate>> {
        let mut groups: BTreeMap<&'static str, Vec<&MappingCandidate>> = BTreeMap::new();
        for candidate in &self.candidates {
            groups
                .entry(candidate.source.kind.as_str())
                .or_default()
                .push(candidate);
        }
        groups
    }

    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary {
            total: self.candidates.len(),
            ..MappingSummary::default()
        };
        for candidate in &self.candidates {
            if candidate.is_mapped() {
                summary.confirmed += 1;
            } else if candidate.has_targets() {
                summary.unmapped += 1;
            } else {
                summary.without_options += 1;
            }
        }
        summary
    }

    /// Returns a new set with the option at `index` selected for `source`.
    ///
    /// # Errors
    ///
    /// Fails if no candidate matches `(source, kind)` or `index` is out of range.
    pub fn select(
        &self,
        source: &str,
        kind: CanonicalType,
        index: usize,
    ) -> Result<Self, SelectionError> {
        self.replace(source, kind, |candidate| candidate.with_selection(index))
    }

    /// Returns a new set with the option named `target` selected for `source`.
    ///
    /// # Errors
    ///
    /// Fails if no candidate matches `(source, kind)` or it has no such option.
    pub fn select_target(
        &self,
        source: &str,
        kind: CanonicalType,
        target: &str,
    ) -> Result<Self, SelectionError> {
        self.replace(source, kind, |candidate| {
            let index =
                candidate
                    .option_index(target)
                    .ok_or_else(|| SelectionError::OptionNotFound {
                        attribute: source.to_string(),
                        target: target.to_string(),
                        kind,
                    })?;
            candidate.with_selection(index)
        })
    }

    /// Returns a new set with `source` reset to "no mapping".
    ///
    /// # Errors
    ///
    /// Fails if no candidate matches `(source, kind)`.
    pub fn clear(&self, source: &str, kind: CanonicalType) -> Result<Self, SelectionError> {
        self.select(source, kind, 0)
    }

    fn replace<F>(&self, source: &str, kind: CanonicalType, edit: F) -> Result<Self, SelectionError>
    where
        F: FnOnce(&MappingCandidate) -> Result<MappingCandidate, SelectionError>,
    {
        let position = self
            .candidates
            .iter()
            .position(|c| c.matches(source, kind))
            .ok_or_else(|| SelectionError::CandidateNotFound {
                attribute: source.to_string(),
                kind,
            })?;
        let mut candidates = self.candidates.clone();
        candidates[position] = edit(&self.candidates[position])?;
        Ok(Self { candidates })
    }
}

impl FromIterator<MappingCandidate> for MappingSet {
    fn from_iter<I: IntoIterator<Item = MappingCandidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for MappingSet {
    type Item = MappingCandidate;
    type IntoIter = std::vec::IntoIter<MappingCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl<'a> IntoIterator for &'a MappingSet {
    type Item = &'a MappingCandidate;
    type IntoIter = std::slice::Iter<'a, MappingCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
