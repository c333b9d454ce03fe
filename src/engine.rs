//! Substitution engine
//!
//! Repeatedly finds the leftmost pair of delimiters in the document,
//! evaluates the payload between them and splices the result back in.
//! Scanning restarts from the top after every substitution: later spans
//! may depend on files opened by earlier ones, and a replacement that
//! itself contains the delimiter is expanded again on a later pass.

use crate::eval::{Evaluator, SpanError};
use crate::policy::ErrorPolicy;
use crate::resolver::ResolutionContext;
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_DELIMITER: char = '£';
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Span(#[from] SpanError),
    #[error("gave up after {0} substitutions; a replacement keeps reintroducing delimiters")]
    IterationLimit(usize),
}

/// Run-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub delimiter: char,
    pub policy: ErrorPolicy,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            delimiter: DEFAULT_DELIMITER,
            policy: ErrorPolicy::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A delimiter-inclusive span located in the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte range of the whole span, delimiters included
    pub range: Range<usize>,
    /// Byte range of the payload between the delimiters
    pub payload: Range<usize>,
}

/// Leftmost delimiter and the next one after it
pub fn find_span(text: &str, delimiter: char) -> Option<Span> {
    let width = delimiter.len_utf8();
    let open = text.find(delimiter)?;
    let payload_start = open + width;
    let close = payload_start + text[payload_start..].find(delimiter)?;
    Some(Span {
        range: open..close + width,
        payload: payload_start..close,
    })
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub output: String,
    /// Spans replaced, placeholders included
    pub substituted: usize,
    /// Spans replaced by the error placeholder
    pub failed: usize,
}

pub struct Engine {
    evaluator: Evaluator,
    config: Config,
}

impl Engine {
    pub fn new(evaluator: Evaluator, config: Config) -> Self {
        Engine { evaluator, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Expand every span in `document`
    pub fn expand(&self, document: &str, ctx: &mut ResolutionContext) -> Result<Expansion, EngineError> {
        let delimiter = self.config.delimiter;
        let mut buffer = document.to_string();
        let mut substituted = 0;
        let mut failed = 0;

        while let Some(span) = find_span(&buffer, delimiter) {
            if substituted >= self.config.max_iterations {
                return Err(EngineError::IterationLimit(substituted));
            }

            let payload = &buffer[span.payload.clone()];
            let outcome = self.evaluator.evaluate(payload, ctx);
            if outcome.is_err() {
                failed += 1;
            }
            let replacement = self.config.policy.apply(outcome)?;
            debug!(payload, %replacement, "substituted span");

            // the located span is the first occurrence of its own text
            buffer.replace_range(span.range, &replacement);
            substituted += 1;
        }

        if buffer.contains(delimiter) {
            warn!(%delimiter, "unpaired delimiter left in output");
        }

        Ok(Expansion {
            output: buffer,
            substituted,
            failed,
        })
    }
}
