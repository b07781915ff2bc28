//! Sequential conversion of many stores with one shared mapping.

use std::fmt;

use matconv_model::ValueStore;
use tracing::{info, warn};

use crate::engine::{ConversionPlan, TransferEngine};
use crate::error::Result;
use crate::report::TransferReport;

const RULE: &str = "-----------------------------------------------------";

/// Result of converting one store.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub store: String,
    pub result: Result<TransferReport>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub source_schema: String,
    pub target_schema: String,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores that were converted.
    pub fn converted(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_ok()).count()
    }

    /// Stores refused by a precondition.
    pub fn failed(&self) -> usize {
        self.len() - self.converted()
    }

    /// Attribute copies across all converted stores.
    pub fn copied(&self) -> usize {
        self.reports().map(TransferReport::copied).sum()
    }

    pub fn reports(&self) -> impl Iterator<Item = &TransferReport> {
        self.entries.iter().filter_map(|e| e.result.as_ref().ok())
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converting {} materials from {} to {}",
            self.len(),
            self.source_schema,
            self.target_schema
        )?;
        writeln!(f, "{RULE}")?;
        for entry in &self.entries {
            match &entry.result {
                Ok(report) => writeln!(f, "{report}")?,
                Err(error) => writeln!(f, "Not converted: {error}")?,
            }
        }
        write!(f, "{RULE}")
    }
}

/// Runs in-place conversion over a sequence of stores.
///
/// A refused store is recorded and the loop moves on to the next one.
pub struct BatchConverter<'a> {
    plan: &'a ConversionPlan,
}

impl<'a> BatchConverter<'a> {
    pub fn new(plan: &'a ConversionPlan) -> Self {
        Self { plan }
    }

    pub fn convert_all<'s, S, I>(&self, stores: I) -> BatchReport
    where
        S: ValueStore + ?Sized + 's,
        I: IntoIterator<Item = &'s mut S>,
    {
        let mut report = BatchReport {
            source_schema: self.plan.source_schema.clone(),
            target_schema: self.plan.target_schema.clone(),
            entries: Vec::new(),
        };
        for store in stores {
            let label = store.label().to_string();
            let result = TransferEngine::convert_in_place(self.plan, store);
            if let Err(error) = &result {
                warn!(store = %label, %error, "store not converted");
            }
            report.entries.push(BatchEntry {
                store: label,
                result,
            });
        }
        info!(
            source_schema = %report.source_schema,
            target_schema = %report.target_schema,
            converted = report.converted(),
            failed = report.failed(),
            copied = report.copied(),
            "batch conversion finished"
        );
        report
    }
}
