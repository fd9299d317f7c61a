//! Documentation content for the rfilter CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Commands,
    Graph,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "where" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "commands" | "limit" | "sample" | "take" | "top" => Some(Self::Commands),
            "graph" | "resource_graph" => Some(Self::Graph),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"RFILTER DOCUMENTATION

rfilter selects cloud resource records with a small subset of the Kusto query
syntax. A query narrows a list of records with where-segments and bounds it
with sample, take or top.

DOCUMENTATION CATEGORIES

  syntax            where-segments, fields, values, and/or chaining
  operators         Comparison operators and their matching rules
  commands          sample, take and top
  graph             Resource Graph input tables and query shaping

QUICK REFERENCE

  where f=='v'                  Keep records whose field f is 'v'
  where a=='1' or b=='2'        Chain comparisons, strictly left to right
  where a.b.c > 10              Nested field
  | sample N                    N random records
  | take N   | top N            First N records

Run 'rfilter doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Commands) => Ok(COMMANDS_DOC),
        Some(DocCategory::Graph) => Ok(GRAPH_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Where-Segments

WHERE
  where <field> <operator> <value>
    Keep the records for which the comparison holds. Exactly one 'where'
    opens a segment; further segments must follow a '|'.

    Example:
      Query:  where instance_id == '0'

FIELDS
  name
  storage_profile.os_disk.os_type
    Identifiers (letters, digits, underscores), joined by '.' for nested
    objects. A record without the field never matches.

VALUES
  'text'  "text"    Quoted string, quotes are stripped
  text              Bare word, read as a string
  30  -1  2.5       Numbers
  true  false  null

AND / OR
  where a == '1' or b == '2' and c == '3'
    Comparisons are combined strictly left to right, without precedence.
    The query above reads as: (a == '1' or b == '2') and c == '3'.

PIPES
  where location == 'westeurope' | where sku.tier == 'Standard' | take 2
    Each stage works on what the stage before it left over.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparisons

  ==    Equal. Integers and floats compare by value, other types must match.
  =~    Equal, ignoring case for strings.
  ~=    Regular expression match on a string field. The value must be quoted.
  <  >  <=  >=
        Ordering between two numbers or two strings. Any other pairing
        does not match.

  Any other combination of '=', '<', '>' and '~' is rejected.

    Example:
      Query:  where name ~= '^aks-nodepool1-.*_[0-3]$'
"#;

const COMMANDS_DOC: &str = r#"COMMANDS - Limiting Stages

  sample N
    N records chosen at random, without repetition. Asking for more
    records than available is an error.

  take N
    The first N records. Fewer records are returned as is.

  top N
    Same as take N.

  The '|' in front of a command may be left out:
    where instance_id == '0' or instance_id == '1' sample 1
"#;

const GRAPH_DOC: &str = r#"GRAPH - Resource Graph Input

INPUT
  rfilter check reads either a JSON array of objects or a Resource Graph
  table:

    {"columns": [{"name": "name", "type": "string"}], "rows": [["vm1"]]}

QUERY SHAPING
  Actions query the graph with:

    Resources | where type=~'<resource type>' | <filter or 'sample 1'>
"#;
