use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    /// Opens a where-segment
    ///
    /// # Examples
    /// ```text
    /// where instance_id == '0'
    /// ```
    Where,

    /// Logical AND (word, not symbol)
    ///
    /// # Examples
    /// ```text
    /// where location == 'westeurope' and instance_id == '0'
    /// ```
    And,

    /// Logical OR (word, not symbol)
    ///
    /// # Examples
    /// ```text
    /// where instance_id == '0' or instance_id == '1'
    /// ```
    Or,

    // Literals
    /// Floating-point number
    Float(f64),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 30
    /// -1
    /// ```
    Integer(i64),

    /// String literal enclosed in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// 'westeurope'
    /// "chaos-pool_0"
    /// ```
    String(String),

    /// Boolean values
    Boolean(bool),

    /// Null value
    Null,

    /// Field name, bare value or command keyword
    ///
    /// Must start with a letter or underscore, followed by letters, digits or
    /// underscores. `sample`, `take` and `top` are recognised by the parser,
    /// not the lexer.
    Identifier(String),

    // Operators
    /// Comparison operator: a run of one or two characters from `= > < ~`
    ///
    /// The lexer does not validate the run, the parser maps it to a
    /// comparison or rejects it.
    Operator(String),

    /// Pipeline separator
    ///
    /// # Examples
    /// ```text
    /// where instance_id == '0' or instance_id == '1' | sample 1
    /// ```
    Pipe,

    /// Path separator in field names (`storage_profile.os_disk.os_type`)
    Dot,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Where => write!(f, "'where'"),
            Token::And => write!(f, "'and'"),
            Token::Or => write!(f, "'or'"),
            Token::Float(n) => write!(f, "number {}", n),
            Token::Integer(n) => write!(f, "number {}", n),
            Token::String(s) => write!(f, "string '{}'", s),
            Token::Boolean(b) => write!(f, "'{}'", b),
            Token::Null => write!(f, "'null'"),
            Token::Identifier(name) => write!(f, "'{}'", name),
            Token::Operator(op) => write!(f, "operator '{}'", op),
            Token::Pipe => write!(f, "'|'"),
            Token::Dot => write!(f, "'.'"),
            Token::Eof => write!(f, "end of query"),
        }
    }
}
