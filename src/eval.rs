//! Evaluator for span expressions
//!
//! A span payload is lexed, parsed into a [`Call`], and dispatched to the
//! extraction [`Registry`]. Every failure is classified into one of the
//! [`ErrorKind`]s so the error policy can treat them uniformly.

use crate::ast::{Arg, Call};
use crate::lexer::{lex, LexError};
use crate::parser::{parse, ParseError};
use crate::registry::Registry;
use crate::resolver::{ResolutionContext, ResolveError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Classification of an evaluation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NameError,
    FileError,
    IndexError,
    SyntaxError,
    EmptyResult,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NameError => "NameError",
            ErrorKind::FileError => "FileError",
            ErrorKind::IndexError => "IndexError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::EmptyResult => "EmptyResult",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("unknown identifier '{0}' (file names must be quoted)")]
    UnknownIdentifier(String),
    #[error("cannot open '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Index(#[from] ResolveError),
    #[error("invalid expression: {0} (file names must be quoted)")]
    Syntax(String),
    #[error("{function} found no value in '{}'", .path.display())]
    Empty { function: String, path: PathBuf },
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnknownFunction(_) | EvalError::UnknownIdentifier(_) => ErrorKind::NameError,
            EvalError::File { .. } => ErrorKind::FileError,
            EvalError::Index(_) => ErrorKind::IndexError,
            EvalError::Syntax(_) => ErrorKind::SyntaxError,
            EvalError::Empty { .. } => ErrorKind::EmptyResult,
        }
    }
}

impl From<LexError> for EvalError {
    fn from(e: LexError) -> Self {
        EvalError::Syntax(e.to_string())
    }
}

impl From<ParseError> for EvalError {
    fn from(e: ParseError) -> Self {
        EvalError::Syntax(e.to_string())
    }
}

/// An evaluation failure tied to the span payload that produced it
#[derive(Error, Debug)]
#[error("{} in '{snippet}': {error}", .error.kind())]
pub struct SpanError {
    pub snippet: String,
    #[source]
    pub error: EvalError,
}

impl SpanError {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Evaluates span payloads against an extraction registry
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: Registry,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Registry::standard())
    }
}

impl Evaluator {
    pub fn new(registry: Registry) -> Self {
        Evaluator { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Evaluate one payload; success always carries non-empty text
    pub fn evaluate(&self, snippet: &str, ctx: &mut ResolutionContext) -> Result<String, SpanError> {
        self.evaluate_inner(snippet, ctx).map_err(|error| SpanError {
            snippet: snippet.to_string(),
            error,
        })
    }

    fn evaluate_inner(&self, snippet: &str, ctx: &mut ResolutionContext) -> Result<String, EvalError> {
        let call = parse(lex(snippet)?)?;
        debug!(function = %call.name, arg = ?call.arg, "evaluating call");
        self.call(&call, ctx)
    }

    /// Dispatch a parsed call to its extraction function
    pub fn call(&self, call: &Call, ctx: &mut ResolutionContext) -> Result<String, EvalError> {
        let extractor = self
            .registry
            .get(&call.name)
            .ok_or_else(|| EvalError::UnknownFunction(call.name.clone()))?;

        let reference = match &call.arg {
            Arg::File(reference) => reference,
            Arg::Ident(name) => return Err(EvalError::UnknownIdentifier(name.clone())),
        };

        let extraction = extractor.extract(reference, ctx)?;
        match extraction.value {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(EvalError::Empty {
                function: call.name.clone(),
                path: extraction.path,
            }),
        }
    }
}
