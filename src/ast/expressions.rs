use std::fmt;

use regex::Regex;

use crate::ast::{CompareOp, Conjunction};

/// A field reference, possibly nested (`storage_profile.os_disk.os_type`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(pub Vec<String>);

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath(path.split('.').map(str::to_string).collect())
    }
}

/// A compiled regular expression used by `~=`.
///
/// Compiled once while parsing; two patterns are equal when their sources are.
#[derive(Debug, Clone)]
pub struct Pattern(pub Regex);

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Quoted string or bare word, quotes stripped
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    /// Regular expression, only produced for `~=`
    Pattern(Pattern),
}

/// A single `<field> <op> <value>` test.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub field: FieldPath,
    pub op: CompareOp,
    pub value: Literal,
}

/// Boolean expression of a where-segment.
///
/// Comparisons are kept flat in textual order and folded left to right, so
/// `and` and `or` share one precedence level:
///
/// ```text
/// where a == 1 or b == 2 and c == 3
///
/// first: a == 1
/// rest:  [(Or, b == 2), (And, c == 3)]      reads as ((a or b) and c)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub first: Comparison,
    pub rest: Vec<(Conjunction, Comparison)>,
}

impl Predicate {
    pub fn new(first: Comparison) -> Self {
        Predicate {
            first,
            rest: Vec::new(),
        }
    }

    pub fn push(&mut self, op: Conjunction, comparison: Comparison) {
        self.rest.push((op, comparison));
    }

    /// Number of comparisons in the segment
    pub fn comparison_count(&self) -> usize {
        1 + self.rest.len()
    }
}
