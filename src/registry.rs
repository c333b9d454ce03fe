//! Extraction registry
//!
//! Each extractor pulls one numeric field out of a model-checker log by
//! matching a fixed label. All extractors share the same steps:
//! resolve the file reference, read the log, take the first match.

use crate::ast::FileReference;
use crate::eval::EvalError;
use crate::resolver::ResolutionContext;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::PathBuf;

/// Numeric field: integer or decimal, optional exponent
const NUMBER: &str = r"([0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?)";

/// (name, description, label pattern); `{n}` marks the captured number
const STANDARD_EXTRACTORS: &[(&str, &str, &str)] = &[
    ("p_time", "total model checking time (seconds)", r"Time for model checking: {n}"),
    ("states", "total number of states", r"States:\s+{n}"),
    ("lp_time", "LP problem solve time (seconds)", r"LP problem solved in {n} seconds"),
    ("lp_vars", "number of LP variables", r"Number of LP variables = {n}"),
    ("vi_time", "value iteration time (seconds)", r"The value iteration\(s\) took {n} seconds"),
    ("objectives", "number of objectives", r"Number of objectives: {n}"),
    ("weights", "number of weight vectors used", r"Number of weight vectors used: {n}"),
];

static STANDARD: Lazy<Vec<Extractor>> = Lazy::new(|| {
    STANDARD_EXTRACTORS
        .iter()
        .map(|(name, description, label)| {
            Extractor::from_label(name, description, label).expect("built-in extractor pattern")
        })
        .collect()
});

/// Outcome of one extraction: the file that was read and the match, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub path: PathBuf,
    pub value: Option<String>,
}

/// A named extraction function over log text
#[derive(Debug, Clone)]
pub struct Extractor {
    name: String,
    description: String,
    pattern: Regex,
}

impl Extractor {
    /// Build from a full regex whose first capture group is the value
    pub fn new(name: &str, description: &str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Extractor {
            name: name.to_string(),
            description: description.to_string(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// Build from a label pattern where `{n}` stands for the numeric field
    pub fn from_label(name: &str, description: &str, label: &str) -> Result<Self, regex::Error> {
        Self::new(name, description, &label.replace("{n}", NUMBER))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// First match in `text`, scanning top to bottom
    pub fn find(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Resolve, read, and match; a successful read is recorded in the history
    pub fn extract(
        &self,
        reference: &FileReference,
        ctx: &mut ResolutionContext,
    ) -> Result<Extraction, EvalError> {
        let path = ctx.resolve(reference)?;
        let bytes = fs::read(&path).map_err(|source| EvalError::File {
            path: path.clone(),
            source,
        })?;
        ctx.record_open(path.clone());

        let text = String::from_utf8_lossy(&bytes);
        Ok(Extraction {
            value: self.find(&text),
            path,
        })
    }
}

/// The set of functions callable from a span
#[derive(Debug, Clone)]
pub struct Registry {
    extractors: Vec<Extractor>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Registry {
    /// The seven built-in model-checker metrics
    pub fn standard() -> Self {
        Registry {
            extractors: STANDARD.clone(),
        }
    }

    /// An empty registry, for building custom sets
    pub fn empty() -> Self {
        Registry {
            extractors: Vec::new(),
        }
    }

    /// Add an extractor, replacing any existing one with the same name
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractors.retain(|e| e.name != extractor.name);
        self.extractors.push(extractor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Extractor> {
        self.extractors.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extractor> {
        self.extractors.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }
}
