use std::fmt;

use crate::ast::Predicate;

/// Limiting command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// `sample N`: N records drawn at random without replacement
    Sample,
    /// `take N`: the first N records
    Take,
    /// `top N`: same as `take N`
    Top,
}

impl LimitKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "sample" => Some(LimitKind::Sample),
            "take" => Some(LimitKind::Take),
            "top" => Some(LimitKind::Top),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            LimitKind::Sample => "sample",
            LimitKind::Take => "take",
            LimitKind::Top => "top",
        }
    }
}

/// A limiting stage such as `sample 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limiter {
    pub kind: LimitKind,
    pub count: usize,
}

impl fmt::Display for Limiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.keyword(), self.count)
    }
}

/// Pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Where-segment
    ///
    /// # Example
    /// ```text
    /// where instance_id == '0' or instance_id == '1'
    /// ```
    Where(Predicate),

    /// Limiting segment
    ///
    /// # Example
    /// ```text
    /// | sample 1
    /// ```
    Limit(Limiter),
}

/// Complete filter query: stages applied left to right to the working set.
///
/// An empty stage list leaves the records untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub stages: Vec<Stage>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
