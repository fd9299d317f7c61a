//! Resource Graph query shaping.
//!
//! Candidate records come from an Azure Resource Graph query that is built
//! here and executed by the caller. The tabular answer (`columns` + `rows`)
//! is turned back into records before [`crate::filter`] narrows it down.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    filter::DEFAULT_QUERY,
    value::{Record, Value},
};

/// Errors raised while shaping Resource Graph data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("could not find resources of type '{resource_type}' and filter '{query}'")]
    NoResources { resource_type: String, query: String },

    #[error("unknown resource type '{0}'")]
    UnknownType(String),
}

/// Resource kinds the fault-injection actions target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    VirtualMachine,
    ScaleSet,
    ScaleSetInstance,
    ManagedCluster,
    WebApp,
}

impl ResourceType {
    pub const ALL: [ResourceType; 5] = [
        ResourceType::VirtualMachine,
        ResourceType::ScaleSet,
        ResourceType::ScaleSetInstance,
        ResourceType::ManagedCluster,
        ResourceType::WebApp,
    ];

    /// ARM type string as used in the `type` column
    pub fn arm_type(&self) -> &'static str {
        match self {
            ResourceType::VirtualMachine => "Microsoft.Compute/virtualMachines",
            ResourceType::ScaleSet => "Microsoft.Compute/virtualMachineScaleSets",
            ResourceType::ScaleSetInstance => {
                "Microsoft.Compute/virtualMachineScaleSets/virtualMachines"
            }
            ResourceType::ManagedCluster => "Microsoft.ContainerService/managedClusters",
            ResourceType::WebApp => "Microsoft.Web/sites",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arm_type())
    }
}

impl FromStr for ResourceType {
    type Err = GraphError;

    /// ARM type names are case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|t| t.arm_type().eq_ignore_ascii_case(s))
            .ok_or_else(|| GraphError::UnknownType(s.to_string()))
    }
}

/// Build the Resource Graph query text for a resource type.
///
/// The user query is appended as a further pipeline stage; without one the
/// query samples a single resource.
///
/// # Examples
///
/// ```
/// use resource_filter::graph::prepare_query;
///
/// assert_eq!(
///     prepare_query("Microsoft.Compute/virtualMachines", None),
///     "Resources | where type=~'Microsoft.Compute/virtualMachines' | sample 1"
/// );
/// assert_eq!(
///     prepare_query("Microsoft.Compute/virtualMachines", Some("where location=='westeurope'")),
///     "Resources | where type=~'Microsoft.Compute/virtualMachines' | where location=='westeurope'"
/// );
/// ```
pub fn prepare_query(resource_type: &str, user_query: Option<&str>) -> String {
    let user_query = match user_query.map(str::trim) {
        Some(q) if !q.is_empty() => q,
        _ => DEFAULT_QUERY,
    };

    let type_clause = format!("where type=~'{}'", resource_type);
    ["Resources", type_clause.as_str(), user_query].join(" | ")
}

/// Request body of a Resource Graph query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: String,
    pub subscriptions: Vec<String>,
}

impl QueryRequest {
    pub fn new(resource_type: &str, user_query: Option<&str>, subscription_id: &str) -> Self {
        QueryRequest {
            query: prepare_query(resource_type, user_query),
            subscriptions: vec![subscription_id.to_string()],
        }
    }
}

/// Column descriptor of a Resource Graph table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Tabular Resource Graph answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceTable {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl ResourceTable {
    /// Zip every row with the column names.
    pub fn into_records(self) -> Result<Vec<Record>, GraphError> {
        let expected = self.columns.len();

        self.rows
            .into_iter()
            .enumerate()
            .map(|(row, cells)| {
                if cells.len() != expected {
                    return Err(GraphError::RowShape {
                        row,
                        expected,
                        found: cells.len(),
                    });
                }
                Ok(self
                    .columns
                    .iter()
                    .zip(cells)
                    .map(|(column, cell)| (column.name.clone(), Value::from(cell)))
                    .collect())
            })
            .collect()
    }
}

/// Fail when a Resource Graph query found nothing.
pub fn require_resources(
    records: Vec<Record>,
    resource_type: &str,
    user_query: Option<&str>,
) -> Result<Vec<Record>, GraphError> {
    if records.is_empty() {
        return Err(GraphError::NoResources {
            resource_type: resource_type.to_string(),
            query: user_query.unwrap_or_default().to_string(),
        });
    }
    Ok(records)
}
