//! Value transfer for material conversion.
//!
//! This crate applies a resolved mapping set to concrete value stores:
//!
//! - **engine**: `TransferEngine::apply` and in-place conversion of one store
//! - **report**: per-attribute outcomes and the console-style trace
//! - **batch**: sequential conversion of many stores with one mapping
//! - **error**: precondition failures that refuse a whole transfer

pub mod batch;
pub mod engine;
pub mod error;
pub mod report;

pub use batch::{BatchConverter, BatchEntry, BatchReport};
pub use engine::{ConversionPlan, TransferEngine};
pub use error::{Result, TransferError};
pub use report::{SkipReason, TransferOutcome, TransferReport};
