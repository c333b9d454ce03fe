//! Tokenization for embedded expressions
//!
//! Tokens represent the atomic elements of the span expression grammar:
//! function names, parentheses, string and integer literals.

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{map, map_res, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A function name or bare identifier
    Ident(String),
    /// Argument list start: (
    LParen,
    /// Argument list end: )
    RParen,
    /// Argument separator: ,
    Comma,
    /// A double- or single-quoted string (quotes stripped)
    Str(String),
    /// An integer literal, optionally negative
    Int(i64),
}

#[derive(Error, Debug, PartialEq)]
pub enum LexError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("integer literal out of range: {0}")]
    IntegerOverflow(String),
}

/// Parse a double-quoted string
fn double_quoted(input: &str) -> IResult<&str, Token> {
    map(
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        |s: &str| Token::Str(s.to_string()),
    )(input)
}

/// Parse a single-quoted string
fn single_quoted(input: &str) -> IResult<&str, Token> {
    map(
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        |s: &str| Token::Str(s.to_string()),
    )(input)
}

/// Parse an identifier: letter or underscore, then word characters
fn ident(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        )),
        |s: &str| Token::Ident(s.to_string()),
    )(input)
}

/// Parse an integer: -1, 0, 42
fn integer(input: &str) -> IResult<&str, Token> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>().map(Token::Int)
    })(input)
}

fn punct(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        value(Token::Comma, char(',')),
    ))(input)
}

/// Parse any single token
fn token(input: &str) -> IResult<&str, Token> {
    preceded(
        multispace0,
        alt((punct, double_quoted, single_quoted, integer, ident)),
    )(input)
}

/// Tokenize a span payload
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let (remaining, tokens) = match many0(token)(input) {
        Ok(parsed) => parsed,
        // many0 only stops with Ok; keep the whole input as unparsed otherwise
        Err(_) => (input, Vec::new()),
    };

    let remaining = remaining.trim_start();
    match remaining.chars().next() {
        None => Ok(tokens),
        Some('"') | Some('\'') => Err(LexError::UnterminatedString),
        Some(c) if c == '-' || c.is_ascii_digit() => {
            let digits: String = remaining
                .chars()
                .take_while(|c| *c == '-' || c.is_ascii_digit())
                .collect();
            if digits.chars().any(|c| c.is_ascii_digit()) {
                Err(LexError::IntegerOverflow(digits))
            } else {
                Err(LexError::UnexpectedChar(c))
            }
        }
        Some(c) => Err(LexError::UnexpectedChar(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_bare_name() {
        let tokens = lex("p_time").unwrap();
        assert_eq!(tokens, vec![Token::Ident("p_time".to_string())]);
    }

    #[test]
    fn tokenize_call_with_string() {
        let tokens = lex("states(\"run1.log\")").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("states".to_string()),
                Token::LParen,
                Token::Str("run1.log".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn tokenize_single_quoted() {
        let tokens = lex("states('a b.log')").unwrap();
        assert_eq!(tokens[2], Token::Str("a b.log".to_string()));
    }

    #[test]
    fn tokenize_negative_index() {
        let tokens = lex(" lp_vars ( -2 ) ").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("lp_vars".to_string()),
                Token::LParen,
                Token::Int(-2),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn tokenize_comma() {
        let tokens = lex("f(1, 2)").unwrap();
        assert!(tokens.contains(&Token::Comma));
    }

    #[test]
    fn tokenize_empty() {
        assert_eq!(lex("   ").unwrap(), vec![]);
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(lex("states(\"run1.log)"), Err(LexError::UnterminatedString));
    }

    #[test]
    fn unexpected_character() {
        assert_eq!(lex("states(run1.log)"), Err(LexError::UnexpectedChar('.')));
    }

    #[test]
    fn integer_overflow() {
        assert!(matches!(
            lex("states(99999999999999999999)"),
            Err(LexError::IntegerOverflow(_))
        ));
    }
}
