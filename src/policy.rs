//! Error policy: what a failed span does to the run

use crate::eval::SpanError;
use std::fmt;
use std::str::FromStr;
use tracing::{error, warn};

/// Text substituted for a failed span under [`ErrorPolicy::Permissive`]
pub const ERROR_PLACEHOLDER: &str = "ERROR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the run on the first failed span
    #[default]
    Strict,
    /// Substitute [`ERROR_PLACEHOLDER`] and keep going
    Permissive,
}

impl ErrorPolicy {
    /// Turn an evaluation outcome into replacement text, or the abort error.
    /// Every failure is reported, whatever the mode.
    pub fn apply(self, outcome: Result<String, SpanError>) -> Result<String, SpanError> {
        let failure = match outcome {
            Ok(text) => return Ok(text),
            Err(failure) => failure,
        };

        match self {
            ErrorPolicy::Strict => {
                error!(kind = %failure.kind(), span = %failure.snippet, "{}", failure.error);
                Err(failure)
            }
            ErrorPolicy::Permissive => {
                warn!(
                    kind = %failure.kind(),
                    span = %failure.snippet,
                    "{}; substituting {}",
                    failure.error,
                    ERROR_PLACEHOLDER
                );
                Ok(ERROR_PLACEHOLDER.to_string())
            }
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Strict => f.write_str("strict"),
            ErrorPolicy::Permissive => f.write_str("permissive"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(ErrorPolicy::Strict),
            "permissive" => Ok(ErrorPolicy::Permissive),
            other => Err(format!("unknown error policy '{}' (expected strict or permissive)", other)),
        }
    }
}
