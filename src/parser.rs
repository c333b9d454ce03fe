//! Parser for span expressions
//!
//! Converts tokens into a single [`Call`]. The grammar is deliberately
//! closed: one function name, at most one literal argument.

use crate::ast::{Arg, Call, FileReference};
use crate::lexer::Token;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyInput,
    #[error("expected a function name, found {0:?}")]
    ExpectedName(Token),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected token: {0:?}")]
    UnexpectedToken(Token),
    #[error("unclosed '('")]
    UnclosedParen,
    #[error("at most one argument is allowed")]
    TooManyArguments,
}

/// Parser state
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Parse the whole token stream into a call
    pub fn parse(&mut self) -> Result<Call, ParseError> {
        let name = match self.advance() {
            None => return Err(ParseError::EmptyInput),
            Some(Token::Ident(name)) => name,
            Some(other) => return Err(ParseError::ExpectedName(other)),
        };

        let arg = match self.peek() {
            None => Arg::File(FileReference::Latest),
            Some(Token::LParen) => {
                self.advance();
                self.parse_arguments()?
            }
            Some(other) => return Err(ParseError::UnexpectedToken(other.clone())),
        };

        if let Some(extra) = self.advance() {
            return Err(ParseError::UnexpectedToken(extra));
        }

        Ok(Call { name, arg })
    }

    /// Parse everything after '(' up to and including ')'
    fn parse_arguments(&mut self) -> Result<Arg, ParseError> {
        let arg = match self.advance().ok_or(ParseError::UnclosedParen)? {
            Token::RParen => return Ok(Arg::File(FileReference::Latest)),
            Token::Str(name) => Arg::File(FileReference::Named(name)),
            Token::Int(index) => Arg::File(FileReference::Index(index)),
            Token::Ident(name) => Arg::Ident(name),
            other => return Err(ParseError::UnexpectedToken(other)),
        };

        match self.advance() {
            Some(Token::RParen) => Ok(arg),
            Some(Token::Comma) => Err(ParseError::TooManyArguments),
            Some(other) => Err(ParseError::UnexpectedToken(other)),
            None => Err(ParseError::UnclosedParen),
        }
    }
}

/// Parse tokens into a call
pub fn parse(tokens: Vec<Token>) -> Result<Call, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}
