//! CLI library components for the material converter.

pub mod cli;
pub mod commands;
pub mod library;
pub mod logging;
pub mod summary;
pub mod types;
