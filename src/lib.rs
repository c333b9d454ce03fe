//! logsplice - splice log metrics into report documents
//!
//! # Overview
//!
//! logsplice scans a text document for pairs of a reserved delimiter
//! (`£` by default), evaluates the expression between each pair against
//! a set of model-checker log files, and replaces the span with the
//! extracted value. Tables and captions in a report stay in sync with the
//! experiment logs without copy-editing.
//!
//! # Core Concepts
//!
//! ## Spans
//!
//! ```text
//! States: £states("dice.log")£     # -> States: 1048
//! Time: £p_time£ s                 # same file as the previous call
//! ```
//!
//! ## File Addressing
//!
//! ```text
//! £states("a.log")£                # searched for in the candidate dirs, in order
//! £states(-1)£                     # most recently opened file
//! £states(0)£                      # first file opened in this run
//! £states£  £states()£             # same as -1
//! ```
//!
//! ## Error Policy
//!
//! In strict mode (the default) the first failing span aborts the run.
//! In permissive mode it is replaced by `ERROR` and the run continues.
//!
//! # Example
//!
//! ```rust,no_run
//! use logsplice::{Config, Engine, Evaluator, ResolutionContext};
//!
//! let mut ctx = ResolutionContext::from_dir_list("logs:old/logs");
//! let engine = Engine::new(Evaluator::default(), Config::default());
//! let expansion = engine.expand("£states(\"dice.log\")£ states", &mut ctx).unwrap();
//! println!("{}", expansion.output);
//! ```

pub mod ast;
pub mod engine;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod policy;
pub mod registry;
pub mod resolver;

// Re-export commonly used items
pub use ast::{Arg, Call, FileReference};
pub use engine::{find_span, Config, Engine, EngineError, Expansion, Span};
pub use eval::{ErrorKind, EvalError, Evaluator, SpanError};
pub use lexer::{lex, LexError, Token};
pub use parser::{parse, ParseError};
pub use policy::{ErrorPolicy, ERROR_PLACEHOLDER};
pub use registry::{Extraction, Extractor, Registry};
pub use resolver::{ResolutionContext, ResolveError};

/// Convenience function to expand a document with the standard registry
pub fn expand(document: &str, dirs: &str, policy: ErrorPolicy) -> Result<String, String> {
    let mut ctx = ResolutionContext::from_dir_list(dirs);
    let config = Config {
        policy,
        ..Config::default()
    };
    let engine = Engine::new(Evaluator::default(), config);
    engine
        .expand(document, &mut ctx)
        .map(|expansion| expansion.output)
        .map_err(|e| e.to_string())
}
