use std::cmp::Ordering;

use rand::{Rng, seq::index};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{
        CompareOp, Comparison, Conjunction, FieldPath, LimitKind, Limiter, Literal, Predicate,
        Query, Stage,
    },
    value::{Record, Value},
};

/// Errors that can occur while running a parsed query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// `sample N` asked for more records than the working set holds
    #[error("cannot sample {requested} records from a working set of {available}")]
    OutOfRange { requested: usize, available: usize },
}

/// Runs parsed queries against a list of records.
///
/// The evaluator only selects and reorders references into the input; records
/// themselves are never copied or modified. The random source is borrowed so
/// that callers decide between `thread_rng` and a seeded generator.
pub struct Evaluator<'g, R: Rng + ?Sized> {
    rng: &'g mut R,
}

impl<'g, R: Rng + ?Sized> Evaluator<'g, R> {
    pub fn new(rng: &'g mut R) -> Self {
        Evaluator { rng }
    }

    /// Evaluates every stage of `query` in order, threading the working set
    /// through each one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{SeedableRng, rngs::StdRng};
    /// use resource_filter::{Evaluator, Record, Value, parser::parse};
    ///
    /// let records: Vec<Record> = ["0", "1", "2"]
    ///     .iter()
    ///     .map(|id| Record::from([("instance_id".to_string(), Value::from(*id))]))
    ///     .collect();
    ///
    /// let query = parse("where instance_id == '0' or instance_id == '2'").unwrap();
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let result = Evaluator::new(&mut rng)
    ///     .eval_query(&query, records.iter().collect())
    ///     .unwrap();
    ///
    /// assert_eq!(result, vec![&records[0], &records[2]]);
    /// ```
    pub fn eval_query<'a>(
        &mut self,
        query: &Query,
        records: Vec<&'a Record>,
    ) -> Result<Vec<&'a Record>, EvalError> {
        let mut working = records;

        for stage in &query.stages {
            let before = working.len();
            working = self.eval_stage(stage, working)?;
            debug!(
                stage = stage_name(stage),
                before,
                after = working.len(),
                "applied filter stage"
            );
        }

        Ok(working)
    }

    fn eval_stage<'a>(
        &mut self,
        stage: &Stage,
        working: Vec<&'a Record>,
    ) -> Result<Vec<&'a Record>, EvalError> {
        match stage {
            Stage::Where(predicate) => Ok(working
                .into_iter()
                .filter(|record| matches(predicate, record))
                .collect()),
            Stage::Limit(limiter) => self.apply_limit(limiter, working),
        }
    }

    fn apply_limit<'a>(
        &mut self,
        limiter: &Limiter,
        mut working: Vec<&'a Record>,
    ) -> Result<Vec<&'a Record>, EvalError> {
        match limiter.kind {
            LimitKind::Sample => {
                if limiter.count > working.len() {
                    return Err(EvalError::OutOfRange {
                        requested: limiter.count,
                        available: working.len(),
                    });
                }
                Ok(index::sample(&mut *self.rng, working.len(), limiter.count)
                    .into_iter()
                    .map(|i| working[i])
                    .collect())
            }
            // `top` has no ranking of its own, it is a prefix like `take`
            LimitKind::Take | LimitKind::Top => {
                working.truncate(limiter.count);
                Ok(working)
            }
        }
    }
}

fn stage_name(stage: &Stage) -> &'static str {
    match stage {
        Stage::Where(_) => "where",
        Stage::Limit(limiter) => limiter.kind.keyword(),
    }
}

/// Evaluates a where-predicate against one record.
///
/// The running result is combined with each following comparison in turn;
/// comparisons whose outcome cannot change it are skipped.
pub fn matches(predicate: &Predicate, record: &Record) -> bool {
    predicate
        .rest
        .iter()
        .fold(compare(&predicate.first, record), |acc, (op, comparison)| {
            match op {
                Conjunction::And => acc && compare(comparison, record),
                Conjunction::Or => acc || compare(comparison, record),
            }
        })
}

fn resolve<'r>(record: &'r Record, path: &FieldPath) -> Option<&'r Value> {
    let (first, rest) = path.segments().split_first()?;
    record.get(first)?.lookup(rest)
}

fn literal_value(literal: &Literal) -> Option<Value> {
    match literal {
        Literal::String(s) => Some(Value::String(s.clone())),
        Literal::Integer(n) => Some(Value::Integer(*n)),
        Literal::Float(n) => Some(Value::Float(*n)),
        Literal::Boolean(b) => Some(Value::Boolean(*b)),
        Literal::Null => Some(Value::Null),
        Literal::Pattern(_) => None,
    }
}

fn compare(comparison: &Comparison, record: &Record) -> bool {
    let Some(field) = resolve(record, &comparison.field) else {
        trace!(field = %comparison.field, "field absent, record excluded");
        return false;
    };

    if let Literal::Pattern(pattern) = &comparison.value {
        return comparison.op == CompareOp::Matches
            && field.as_str().is_some_and(|s| pattern.0.is_match(s));
    }

    let Some(expected) = literal_value(&comparison.value) else {
        return false;
    };

    match comparison.op {
        CompareOp::Equal => field.loose_eq(&expected),
        CompareOp::EqualIgnoreCase => match (field.as_str(), expected.as_str()) {
            (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
            _ => field.loose_eq(&expected),
        },
        CompareOp::Matches => false,
        CompareOp::LessThan => ordered(comparison, field, &expected, Ordering::is_lt),
        CompareOp::GreaterThan => ordered(comparison, field, &expected, Ordering::is_gt),
        CompareOp::LessEqual => ordered(comparison, field, &expected, Ordering::is_le),
        CompareOp::GreaterEqual => ordered(comparison, field, &expected, Ordering::is_ge),
    }
}

fn ordered(
    comparison: &Comparison,
    field: &Value,
    expected: &Value,
    accept: fn(Ordering) -> bool,
) -> bool {
    match field.compare(expected) {
        Some(ordering) => accept(ordering),
        None => {
            trace!(
                field = %comparison.field,
                found = field.type_name(),
                expected = expected.type_name(),
                "values have no ordering, record excluded"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn predicate(query: &str) -> Predicate {
        match parse(query).unwrap().stages.remove(0) {
            Stage::Where(p) => p,
            other => panic!("expected where stage, got {:?}", other),
        }
    }

    #[test]
    fn test_and_or_fold_left_without_precedence() {
        // a or b and c  ==  (a or b) and c
        let rec = record(&[
            ("a", Value::from("1")),
            ("b", Value::from("0")),
            ("c", Value::from("0")),
        ]);
        assert!(!matches(&predicate("where a=='1' or b=='1' and c=='1'"), &rec));
        // a conventional precedence reading would give: a or (b and c) == true
    }

    #[test]
    fn test_long_or_chain() {
        let mut query = String::from("where instance_id=='0'");
        for i in 0..50_000 {
            query.push_str(&format!(" or instance_id=='x{}'", i));
        }
        let predicate = predicate(&query);
        assert_eq!(predicate.comparison_count(), 50_001);

        assert!(matches(&predicate, &record(&[("instance_id", Value::from("0"))])));
        assert!(matches(&predicate, &record(&[("instance_id", Value::from("x49999"))])));
        assert!(!matches(&predicate, &record(&[("instance_id", Value::from("1"))])));
    }

    #[test]
    fn test_case_insensitive_equality() {
        let rec = record(&[("location", Value::from("WestEurope"))]);
        assert!(matches(&predicate("where location =~ 'westeurope'"), &rec));
        assert!(!matches(&predicate("where location == 'westeurope'"), &rec));
    }

    #[test]
    fn test_pattern_on_non_string_is_no_match() {
        let rec = record(&[("count", Value::Integer(3))]);
        assert!(!matches(&predicate("where count ~= '3'"), &rec));
    }

    #[test]
    fn test_ordering_on_numbers_and_strings() {
        let rec = record(&[("size", Value::Integer(30)), ("name", Value::from("vm-b"))]);
        assert!(matches(&predicate("where size > 29.5"), &rec));
        assert!(matches(&predicate("where size <= 30"), &rec));
        assert!(matches(&predicate("where name >= 'vm-a'"), &rec));
        assert!(!matches(&predicate("where name > 5"), &rec));
    }

    #[test]
    fn test_sample_larger_than_working_set() {
        let records = vec![record(&[("a", Value::Integer(1))])];
        let mut rng = rand::thread_rng();
        let err = Evaluator::new(&mut rng)
            .eval_query(&parse("sample 2").unwrap(), records.iter().collect())
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::OutOfRange {
                requested: 2,
                available: 1
            }
        );
    }
}
