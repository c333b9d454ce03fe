//! AST for span expressions
//!
//! A span payload parses into a single [`Call`]: a registry function name
//! plus an optional argument addressing the log file to read.

use std::fmt;

/// Which log file an extraction call refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReference {
    /// A literal file name, searched for in the candidate directories
    Named(String),
    /// Position in the history of opened files; negative counts from the end
    Index(i64),
    /// No argument given: the most recently opened file
    Latest,
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileReference::Named(name) => write!(f, "\"{}\"", name),
            FileReference::Index(i) => write!(f, "{}", i),
            FileReference::Latest => write!(f, "<latest>"),
        }
    }
}

/// Argument as written in the expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    File(FileReference),
    /// An unquoted identifier; never valid, but kept so the evaluator can
    /// report it as an unknown name
    Ident(String),
}

/// A function call: `name`, `name()`, `name("file")`, `name(-1)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub arg: Arg,
}

impl Call {
    pub fn new(name: impl Into<String>, reference: FileReference) -> Self {
        Call {
            name: name.into(),
            arg: Arg::File(reference),
        }
    }
}
