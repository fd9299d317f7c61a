// tests/lexer_tests.rs

use resource_filter::ast::Token;
use resource_filter::lexer::{LexError, Lexer, Position};

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_operator_runs() {
    let test_cases = vec!["==", "=~", "~=", "<", ">", "<=", ">=", "=", "~", ">>", "==="];

    for input in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Operator(input.to_string()),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_operator_without_spaces() {
    assert_eq!(
        tokens("instance_id=='0'"),
        vec![
            Token::Identifier("instance_id".to_string()),
            Token::Operator("==".to_string()),
            Token::String("0".to_string()),
            Token::Eof,
        ]
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_strings_strip_quotes() {
    assert_eq!(
        tokens(r#"'single' "double""#),
        vec![
            Token::String("single".to_string()),
            Token::String("double".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        tokens(r"'it\'s' 'a\\b'"),
        vec![
            Token::String("it's".to_string()),
            Token::String(r"a\b".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        tokens("30 -1 2.5"),
        vec![
            Token::Integer(30),
            Token::Integer(-1),
            Token::Float(2.5),
            Token::Eof,
        ]
    );
}

#[test]
fn test_dotted_path() {
    assert_eq!(
        tokens("storage_profile.os_disk"),
        vec![
            Token::Identifier("storage_profile".to_string()),
            Token::Dot,
            Token::Identifier("os_disk".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_commands_are_identifiers() {
    assert_eq!(
        tokens("| sample 1 take 2 top 3"),
        vec![
            Token::Pipe,
            Token::Identifier("sample".to_string()),
            Token::Integer(1),
            Token::Identifier("take".to_string()),
            Token::Integer(2),
            Token::Identifier("top".to_string()),
            Token::Integer(3),
            Token::Eof,
        ]
    );
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_token_positions() {
    let positions: Vec<Position> = Lexer::new("where  a == 1")
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|(_, position)| position)
        .collect();

    assert_eq!(
        positions,
        vec![
            Position(0),
            Position(7),
            Position(9),
            Position(12),
            Position(13)
        ]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_string() {
    let err = Lexer::new("where name == 'vm").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedString {
            position: Position(14)
        }
    );
}

#[test]
fn test_unexpected_character() {
    let err = Lexer::new("where a != 1").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            ch: '!',
            position: Position(8)
        }
    );
}

#[test]
fn test_unknown_escape_is_kept() {
    assert_eq!(
        tokens(r"'^vm_\d+$'"),
        vec![Token::String(r"^vm_\d+$".to_string()), Token::Eof]
    );
}

#[test]
fn test_integer_overflow() {
    let err = Lexer::new("take 99999999999999999999").tokenize().unwrap_err();
    assert!(matches!(err, LexError::InvalidNumber { .. }));
}
