//! Run filter queries against JSON input

use rand::{SeedableRng, rngs::StdRng};

use super::{CliError, json_to_records, records_to_json};
use crate::filter::{compile, filter, filter_with_rng};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter query to run
    pub query: String,
    /// JSON input string
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
    /// Seed for `sample`, random when absent
    pub seed: Option<u64>,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query executed successfully with JSON output
    Success(serde_json::Value),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = &options.query;

    if options.syntax_only {
        compile(query)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    let records = json_to_records(json_value)?;

    let selected = match options.seed {
        Some(seed) => filter_with_rng(&records, query, &mut StdRng::seed_from_u64(seed))?,
        None => filter(&records, query)?,
    };

    Ok(CheckResult::Success(records_to_json(&selected)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(query: &str, input: &str) -> Result<CheckResult, CliError> {
        execute_check(&CheckOptions {
            query: query.to_string(),
            input: Some(input.to_string()),
            seed: Some(1),
            ..Default::default()
        })
    }

    #[test]
    fn test_check_filters_array_input() {
        let input = r#"[{"instance_id": "0"}, {"instance_id": "1"}]"#;
        match run("where instance_id == '1'", input).unwrap() {
            CheckResult::Success(out) => {
                assert_eq!(out, serde_json::json!([{"instance_id": "1"}]))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_check_reads_graph_table() {
        let input = r#"{"columns": [{"name": "name", "type": "string"}], "rows": [["vm1"], ["vm2"]]}"#;
        match run("take 1", input).unwrap() {
            CheckResult::Success(out) => assert_eq!(out, serde_json::json!([{"name": "vm1"}])),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_syntax_only_needs_no_input() {
        let options = CheckOptions {
            query: "where a == 1 | top 2".to_string(),
            syntax_only: true,
            ..Default::default()
        };
        assert!(matches!(execute_check(&options), Ok(CheckResult::SyntaxValid)));
    }

    #[test]
    fn test_missing_input() {
        let options = CheckOptions {
            query: "take 1".to_string(),
            ..Default::default()
        };
        assert!(matches!(execute_check(&options), Err(CliError::NoInput)));
    }

    #[test]
    fn test_rejects_scalar_elements() {
        let err = run("take 1", r#"[{"a": 1}, 2]"#).unwrap_err();
        assert!(matches!(err, CliError::NotARecord { index: 1 }));
    }
}
