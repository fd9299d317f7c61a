//! Public entry points of the filter engine.
//!
//! A query is tokenised and parsed once, then its stages run left to right
//! over references into the caller's records:
//!
//! ```
//! use resource_filter::{Record, Value, filter};
//!
//! let records: Vec<Record> = ["0", "1", "2"]
//!     .iter()
//!     .map(|id| Record::from([("instance_id".to_string(), Value::from(*id))]))
//!     .collect();
//!
//! let picked = filter(&records, "where instance_id=='0' or instance_id=='1' | sample 1").unwrap();
//! assert_eq!(picked.len(), 1);
//! assert_ne!(picked[0]["instance_id"], Value::from("2"));
//! ```

use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    ast::Query,
    evaluator::{EvalError, Evaluator},
    parser::{ParseError, parse},
    value::Record,
};

/// Query applied by [`select_targets`] when the user gave none.
pub const DEFAULT_QUERY: &str = "sample 1";

/// Errors surfaced to callers of the filter engine.
///
/// Messages name the offending query so they can be shown to the user as is.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The query does not follow the where/limiting grammar
    #[error("'{query}' is an invalid query: {source}")]
    QueryParse {
        query: String,
        #[source]
        source: ParseError,
    },

    /// A command after '|' is none of where, sample, take or top
    #[error("'{query}' uses the unrecognized command '{command}' (use sample, take or top)")]
    UnrecognizedCommand { query: String, command: String },

    /// `sample N` asked for more records than available
    #[error("cannot sample {requested} records, only {available} available")]
    OutOfRange { requested: usize, available: usize },
}

impl From<EvalError> for FilterError {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::OutOfRange {
                requested,
                available,
            } => FilterError::OutOfRange {
                requested,
                available,
            },
        }
    }
}

/// Parse `query` into its stages, attaching the query text to any error.
pub fn compile(query: &str) -> Result<Query, FilterError> {
    parse(query).map_err(|source| match source {
        ParseError::UnknownCommand { name, .. } => FilterError::UnrecognizedCommand {
            query: query.to_string(),
            command: name,
        },
        source => FilterError::QueryParse {
            query: query.to_string(),
            source,
        },
    })
}

/// Select the records matching `query`.
///
/// An empty record list short-circuits to an empty result without looking at
/// the query. An empty query returns every record in its original order.
pub fn filter<'a>(records: &'a [Record], query: &str) -> Result<Vec<&'a Record>, FilterError> {
    filter_with_rng(records, query, &mut rand::thread_rng())
}

/// Same as [`filter`], drawing `sample` stages from `rng`.
pub fn filter_with_rng<'a, R: Rng + ?Sized>(
    records: &'a [Record],
    query: &str,
    rng: &mut R,
) -> Result<Vec<&'a Record>, FilterError> {
    if records.is_empty() {
        return Ok(vec![]);
    }

    let query = compile(query)?;
    if query.is_empty() {
        debug!(records = records.len(), "empty query, every record kept");
        return Ok(records.iter().collect());
    }
    let selected = Evaluator::new(rng).eval_query(&query, records.iter().collect())?;
    Ok(selected)
}

/// Pick the targets of an action from fetched records.
///
/// A missing or blank filter falls back to [`DEFAULT_QUERY`], so an action
/// never hits every resource by accident.
pub fn select_targets<'a>(
    records: &'a [Record],
    user_filter: Option<&str>,
) -> Result<Vec<&'a Record>, FilterError> {
    select_targets_with_rng(records, user_filter, &mut rand::thread_rng())
}

/// Same as [`select_targets`], drawing `sample` stages from `rng`.
pub fn select_targets_with_rng<'a, R: Rng + ?Sized>(
    records: &'a [Record],
    user_filter: Option<&str>,
    rng: &mut R,
) -> Result<Vec<&'a Record>, FilterError> {
    let query = match user_filter.map(str::trim) {
        Some(q) if !q.is_empty() => q,
        _ => {
            warn!(default = DEFAULT_QUERY, "no filter given, using default");
            DEFAULT_QUERY
        }
    };
    filter_with_rng(records, query, rng)
}
