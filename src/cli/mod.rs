//! CLI support for resource-filter
//!
//! Provides programmatic access to the `rfilter` commands so that other tools
//! can embed them.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{json_to_records, records_to_json};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Filter(#[from] crate::FilterError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid resource table: {0}")]
    Graph(#[from] crate::graph::GraphError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Input element {index} is not a JSON object")]
    NotARecord { index: usize },

    #[error("Unknown category: '{0}'\nRun 'rfilter docs' to see available categories.")]
    UnknownCategory(String),
}
