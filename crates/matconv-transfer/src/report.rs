//! Transfer outcomes and their console trace.

use std::fmt;

use matconv_model::{CanonicalType, PropertyValue};

/// Why a confirmed pair was not copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    SourceMissing,
    SourceKindMismatch { found: CanonicalType },
    TargetMissing,
    TargetKindMismatch { found: CanonicalType },
    /// The store refused the write.
    WriteRejected(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceMissing => f.write_str("source attribute missing"),
            Self::SourceKindMismatch { found } => write!(f, "source attribute is {found}"),
            Self::TargetMissing => f.write_str("target attribute missing"),
            Self::TargetKindMismatch { found } => write!(f, "target attribute is {found}"),
            Self::WriteRejected(message) => write!(f, "write rejected: {message}"),
        }
    }
}

/// What happened to one confirmed candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    Copied {
        source: String,
        target: String,
        value: PropertyValue,
    },
    Skipped {
        source: String,
        target: String,
        kind: CanonicalType,
        reason: SkipReason,
    },
}

impl TransferOutcome {
    pub fn source(&self) -> &str {
        match self {
            Self::Copied { source, .. } | Self::Skipped { source, .. } => source,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Copied { target, .. } | Self::Skipped { target, .. } => target,
        }
    }

    pub fn kind(&self) -> CanonicalType {
        match self {
            Self::Copied { value, .. } => value.kind(),
            Self::Skipped { kind, .. } => *kind,
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied { .. })
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copied {
                source,
                target,
                value,
            } => {
                write!(f, "Mapped {}: {source} -> {target} = {value}", value.kind())?;
                if let PropertyValue::Texture(slot) = value {
                    write!(f, "\n  Offset: {}, Scale: {}", slot.offset, slot.scale)?;
                }
                Ok(())
            }
            Self::Skipped {
                source,
                target,
                kind,
                reason,
            } => write!(f, "Skipped {kind}: {source} -> {target} ({reason})"),
        }
    }
}

/// Ordered record of every copy and skip performed on one store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferReport {
    /// Label of the store that was written to.
    pub store: String,
    pub outcomes: Vec<TransferOutcome>,
}

impl TransferReport {
    pub fn new(store: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: TransferOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn copied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_copied()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransferOutcome> {
        self.outcomes.iter()
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Converting material: {}", self.store)?;
        for outcome in &self.outcomes {
            for line in outcome.to_string().lines() {
                write!(f, "\n  {line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matconv_model::{Rgba, TextureRef, TextureSlot, Vec2};

    #[test]
    fn texture_outcome_adds_tiling_line() {
        let outcome = TransferOutcome::Copied {
            source: "_MainTex".to_string(),
            target: "_BaseMap".to_string(),
            value: PropertyValue::Texture(TextureSlot::new(
                Some(TextureRef::new("bark")),
                Vec2::ZERO,
                Vec2::ONE,
            )),
        };
        assert_eq!(
            outcome.to_string(),
            "Mapped Texture: _MainTex -> _BaseMap = bark\n  Offset: (0.00, 0.00), Scale: (1.00, 1.00)"
        );
    }

    #[test]
    fn counts_split_copied_and_skipped() {
        let mut report = TransferReport::new("Rock");
        report.push(TransferOutcome::Copied {
            source: "_Color".to_string(),
            target: "_BaseColor".to_string(),
            value: PropertyValue::Color(Rgba::WHITE),
        });
        report.push(TransferOutcome::Skipped {
            source: "_Glossiness".to_string(),
            target: "_Smoothness".to_string(),
            kind: CanonicalType::Scalar,
            reason: SkipReason::TargetMissing,
        });
        assert_eq!(report.copied(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.outcomes[1].kind(), CanonicalType::Scalar);
    }
}
