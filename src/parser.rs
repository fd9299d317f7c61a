use std::mem;

use regex::Regex;
use thiserror::Error;

use crate::{
    ast::{
        CompareOp, Comparison, Conjunction, FieldPath, LimitKind, Limiter, Literal, Pattern,
        Predicate, Query, Stage, Token,
    },
    lexer::{LexError, Lexer, Position},
};

/// Errors raised while parsing a filter query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: String,
        found: Token,
        position: Position,
    },

    #[error("unsupported operator '{op}' at {position} (use ==, =~, ~=, <, >, <= or >=)")]
    UnsupportedOperator { op: String, position: Position },

    #[error("second 'where' at {position}; separate where-segments with '|'")]
    DuplicateWhere { position: Position },

    #[error("unknown command '{name}' at {position} (use where, sample, take or top)")]
    UnknownCommand { name: String, position: Position },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid count {value} for '{command}' at {position}")]
    InvalidCount {
        command: &'static str,
        value: String,
        position: Position,
    },
}

const STAGE_START: &str = "'where', 'sample', 'take' or 'top'";

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_position();
        Ok(Parser {
            lexer,
            current_token,
            current_position,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_position();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: self.current_token.clone(),
            position: self.current_position,
        }
    }

    /// Parse a complete query
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        let mut stages: Vec<Stage> = vec![];

        // A leading '|' is tolerated in front of a limiting stage
        let mut piped = self.check(&Token::Pipe);
        if piped {
            self.advance()?;
        }

        loop {
            if self.check(&Token::Eof) {
                if piped {
                    return Err(self.unexpected(format!("{} after '|'", STAGE_START)));
                }
                break;
            }

            let stage = self.parse_stage(piped, stages.last())?;
            stages.push(stage);

            piped = self.check(&Token::Pipe);
            if piped {
                self.advance()?;
            }
        }

        Ok(Query { stages })
    }

    fn parse_stage(&mut self, piped: bool, previous: Option<&Stage>) -> Result<Stage, ParseError> {
        match &self.current_token {
            Token::Where => match (previous, piped) {
                (None, false) | (Some(_), true) => self.parse_where().map(Stage::Where),
                (None, true) => {
                    Err(self.unexpected("'sample', 'take' or 'top' after a leading '|'"))
                }
                (Some(Stage::Where(_)), false) => Err(ParseError::DuplicateWhere {
                    position: self.current_position,
                }),
                (Some(Stage::Limit(_)), false) => Err(self.unexpected("'|' before 'where'")),
            },
            Token::Identifier(name) => match LimitKind::from_keyword(name) {
                Some(kind) => self.parse_limiter(kind).map(Stage::Limit),
                None if piped => Err(ParseError::UnknownCommand {
                    name: name.clone(),
                    position: self.current_position,
                }),
                None => Err(self.unexpected(STAGE_START)),
            },
            _ => Err(self.unexpected(STAGE_START)),
        }
    }

    /// Parse `where <comparison> (and|or <comparison>)*`, folding left to right.
    fn parse_where(&mut self) -> Result<Predicate, ParseError> {
        self.advance()?; // consume 'where'

        let mut predicate = Predicate::new(self.parse_comparison()?);

        loop {
            let op = match &self.current_token {
                Token::And => Conjunction::And,
                Token::Or => Conjunction::Or,
                _ => break,
            };

            self.advance()?;
            predicate.push(op, self.parse_comparison()?);
        }
        Ok(predicate)
    }

    fn parse_field(&mut self) -> Result<FieldPath, ParseError> {
        let mut segments = vec![];

        loop {
            match mem::replace(&mut self.current_token, Token::Eof) {
                Token::Identifier(name) => {
                    segments.push(name);
                    self.advance()?;
                }
                token => {
                    self.current_token = token;
                    return Err(self.unexpected("field name"));
                }
            }

            if !self.check(&Token::Dot) {
                break;
            }
            self.advance()?; // consume '.'
        }

        Ok(FieldPath(segments))
    }

    fn parse_operator(&mut self) -> Result<CompareOp, ParseError> {
        let op = match &self.current_token {
            Token::Operator(symbol) => {
                CompareOp::from_symbol(symbol).ok_or_else(|| ParseError::UnsupportedOperator {
                    op: symbol.clone(),
                    position: self.current_position,
                })?
            }
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.advance()?;
        Ok(op)
    }

    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let literal = match &self.current_token {
            Token::String(s) => Literal::String(s.clone()),
            // Bare words are strings, not field references
            Token::Identifier(s) => Literal::String(s.clone()),
            Token::Integer(n) => Literal::Integer(*n),
            Token::Float(n) => Literal::Float(*n),
            Token::Boolean(b) => Literal::Boolean(*b),
            Token::Null => Literal::Null,
            _ => return Err(self.unexpected("value")),
        };
        self.advance()?;
        Ok(literal)
    }

    fn parse_comparison(&mut self) -> Result<Comparison, ParseError> {
        let field = self.parse_field()?;
        let op = self.parse_operator()?;

        let value = if op == CompareOp::Matches {
            let pattern = match &self.current_token {
                Token::String(s) => s.clone(),
                _ => return Err(self.unexpected("quoted pattern after '~='")),
            };
            let regex = Regex::new(&pattern)
                .map_err(|source| ParseError::InvalidPattern { pattern, source })?;
            self.advance()?;
            Literal::Pattern(Pattern(regex))
        } else {
            self.parse_literal()?
        };

        Ok(Comparison { field, op, value })
    }

    fn parse_limiter(&mut self, kind: LimitKind) -> Result<Limiter, ParseError> {
        self.advance()?; // consume keyword

        let invalid = |value: String, position| ParseError::InvalidCount {
            command: kind.keyword(),
            value,
            position,
        };

        let count = match &self.current_token {
            Token::Integer(n) => {
                usize::try_from(*n).map_err(|_| invalid(n.to_string(), self.current_position))?
            }
            Token::Float(n) => return Err(invalid(n.to_string(), self.current_position)),
            _ => return Err(self.unexpected(format!("count after '{}'", kind.keyword()))),
        };
        self.advance()?;

        Ok(Limiter { kind, count })
    }
}

/// Parse a query string in one go.
///
/// # Examples
///
/// ```
/// use resource_filter::parser::parse;
/// use resource_filter::ast::{LimitKind, Stage};
///
/// let query = parse("where instance_id == '0' or instance_id == '1' | sample 1").unwrap();
/// assert_eq!(query.stages.len(), 2);
/// assert!(matches!(&query.stages[1], Stage::Limit(l) if l.kind == LimitKind::Sample));
/// ```
pub fn parse(query: &str) -> Result<Query, ParseError> {
    Parser::new(Lexer::new(query))?.parse_query()
}
