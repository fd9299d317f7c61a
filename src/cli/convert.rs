//! JSON <-> record conversion for CLI input and output

use super::CliError;
use crate::{
    Record,
    graph::ResourceTable,
    value::{record_from_json, record_to_json},
};

/// Read records from a JSON document.
///
/// Accepts an array of objects, a single object, or a Resource Graph table
/// (`{"columns": [...], "rows": [...]}`).
pub fn json_to_records(v: serde_json::Value) -> Result<Vec<Record>, CliError> {
    if v.get("columns").is_some() {
        let table: ResourceTable = serde_json::from_value(v)?;
        return Ok(table.into_records()?);
    }

    match v {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| record_from_json(item).ok_or(CliError::NotARecord { index }))
            .collect(),
        other => record_from_json(other)
            .map(|record| vec![record])
            .ok_or(CliError::NotARecord { index: 0 }),
    }
}

/// Write selected records as a JSON array
pub fn records_to_json(records: &[&Record]) -> serde_json::Value {
    serde_json::Value::Array(records.iter().map(|r| record_to_json(r)).collect())
}
