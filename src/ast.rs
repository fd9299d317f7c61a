//! # Resource Filter Query Language - Abstract Syntax Tree
//!
//! This module defines the AST for the filter language used to narrow a list
//! of cloud resource records, a small subset of the Kusto query syntax.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Where-segment predicates, comparisons and literals
//! - **[operators]** - Comparison operators and `and`/`or` connectives
//! - **[query]** - Pipeline stages and the complete query
//!
//! ## Quick Start
//!
//! ```text
//! where instance_id == '0' or instance_id == '1' | sample 1
//! ```
//!
//! This query keeps the instances `0` and `1`, then picks one of them at random.
//!
//! ## Core Concepts
//!
//! ### Pipeline Structure
//!
//! A query is a sequence of stages. Each stage consumes the working set left
//! by the previous one (the full record list for the first stage):
//!
//! ```text
//! where ... | sample N | take N | where ...
//! ```
//!
//! The `|` before a limiting stage may be omitted. A where-segment that
//! follows another stage must be introduced by `|`.
//!
//! ### Stages
//!
//! - **where** - Keep the records the predicate holds for
//! - **sample N** - N records drawn at random without replacement
//! - **take N** / **top N** - The first N records
//!
//! ### Evaluation Order
//!
//! `and` and `or` have the same precedence and group left to right:
//! `a or b and c` is `(a or b) and c`.
//!
//! ## Examples
//!
//! ```text
//! where instance_id == '0'
//! where location =~ 'WestEurope' and sku.tier == 'Standard'
//! where name ~= '^aks-nodepool1' | take 3
//! sample 2
//! ```
pub mod expressions;
pub mod operators;
pub mod query;
pub mod tokens;

pub use expressions::{Comparison, FieldPath, Literal, Pattern, Predicate};
pub use operators::{CompareOp, Conjunction};
pub use query::{LimitKind, Limiter, Query, Stage};
pub use tokens::Token;
