pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod filter;
pub mod graph;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{Predicate, Query, Stage, Token};
pub use evaluator::{EvalError, Evaluator};
pub use filter::{DEFAULT_QUERY, FilterError, filter, filter_with_rng, select_targets};
pub use graph::{QueryRequest, ResourceTable, ResourceType};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser};
pub use value::{Record, Value};
