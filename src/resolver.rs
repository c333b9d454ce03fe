//! File resolver for extraction calls
//!
//! Turns a [`FileReference`] into a concrete path by:
//! 1. Searching the candidate directories in order for a named file
//! 2. Indexing into the history of files opened so far

use crate::ast::FileReference;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error(
        "file index {index} out of range: {opened} file(s) opened so far \
         (probably requesting the n-th last file when fewer than n files have been opened)"
    )]
    OutOfRange { index: i64, opened: usize },
}

/// Per-run addressing state: where to look for files and what has been opened
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    /// Candidate directories, searched in order
    dirs: Vec<PathBuf>,
    /// Every successful open, in order, duplicates included
    history: Vec<PathBuf>,
}

impl ResolutionContext {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        ResolutionContext {
            dirs,
            history: Vec::new(),
        }
    }

    /// Build from a colon-separated directory list, e.g. `logs:../old/logs`
    pub fn from_dir_list(list: &str) -> Self {
        Self::new(split_dir_list(list))
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    /// Resolve a reference to a path without touching the history
    pub fn resolve(&self, reference: &FileReference) -> Result<PathBuf, ResolveError> {
        match reference {
            FileReference::Named(name) => Ok(self.search_dirs(name)),
            FileReference::Index(index) => self.lookup(*index),
            FileReference::Latest => self.lookup(-1),
        }
    }

    /// Record that `path` was opened; called once per successful open
    pub fn record_open(&mut self, path: PathBuf) {
        trace!(path = %path.display(), position = self.history.len(), "recorded open");
        self.history.push(path);
    }

    /// First candidate directory holding `name` as a regular file, or the
    /// bare name so the open reports the I/O error
    fn search_dirs(&self, name: &str) -> PathBuf {
        for dir in &self.dirs {
            let path = Path::new(dir).join(name);
            if path.is_file() {
                return path;
            }
        }
        PathBuf::from(name)
    }

    /// Sequence indexing with negative offsets from the end
    fn lookup(&self, index: i64) -> Result<PathBuf, ResolveError> {
        let opened = self.history.len();
        let out_of_range = ResolveError::OutOfRange { index, opened };
        let position = if index < 0 {
            let back = usize::try_from(index.unsigned_abs()).map_err(|_| out_of_range.clone())?;
            opened.checked_sub(back).ok_or(out_of_range.clone())?
        } else {
            usize::try_from(index).map_err(|_| out_of_range.clone())?
        };
        self.history.get(position).cloned().ok_or(out_of_range)
    }
}

/// Split a colon-separated directory list, skipping empty entries
pub fn split_dir_list(list: &str) -> Vec<PathBuf> {
    list.split(':')
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .collect()
}
