//! # Batch Parsing
//!
//! Parses many files in parallel with rayon, sharing one [`Session`] and
//! one [`ParseCache`].
//!
//! The cache is the only shared state. It is write-once per path: the first
//! successful parse stored for a path wins, and later requests for that path
//! get the stored result without reading or parsing the file again. Failed
//! parses are not cached.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cpp_parser::batch::{parse_files, ParseCache};
//! use cpp_parser::Session;
//!
//! let cache = ParseCache::new();
//! let results = parse_files(&["a.h", "b.cpp"], &Session::default(), &cache);
//! for (path, result) in results {
//!     match result {
//!         Ok(parsed) => println!("{}: {} errors", path.display(), parsed.errors.len()),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```

use crate::error::ParseError;
use crate::session::{ParsedSource, Session};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Failure to produce a parse for one file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The text hit a fatal parse error.
    #[error("failed to parse {}: {error}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: ParseError,
    },
}

impl SourceError {
    /// Path of the file that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

// =============================================================================
// CACHE
// =============================================================================

/// Path-keyed, write-once store of completed parses.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: RwLock<HashMap<PathBuf, Arc<ParsedSource>>>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored parse for `path`.
    pub fn get(&self, path: &Path) -> Option<Arc<ParsedSource>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(path).cloned()
    }

    /// Store `parsed` unless `path` already has an entry. Returns the entry
    /// that ends up stored.
    pub fn insert(&self, path: PathBuf, parsed: ParsedSource) -> Arc<ParsedSource> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(path).or_insert_with(|| Arc::new(parsed)).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Read and parse one file through the cache.
pub fn parse_file(path: &Path, session: &Session, cache: &ParseCache) -> Result<Arc<ParsedSource>, SourceError> {
    if let Some(parsed) = cache.get(path) {
        return Ok(parsed);
    }
    let source = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = session.parse(&source).map_err(|error| SourceError::Parse {
        path: path.to_path_buf(),
        error,
    })?;
    Ok(cache.insert(path.to_path_buf(), parsed))
}

/// Parse files in parallel.
///
/// ## Parameters
///
/// - `paths`: Files to parse
/// - `session`: Shared configuration
/// - `cache`: Shared results; consulted before reading each file
///
/// ## Returns
///
/// One result per input path, in input order.
pub fn parse_files<P>(
    paths: &[P],
    session: &Session,
    cache: &ParseCache,
) -> Vec<(PathBuf, Result<Arc<ParsedSource>, SourceError>)>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            (path.to_path_buf(), parse_file(path, session, cache))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let session = Session::default();
        let cache = ParseCache::new();
        let first = cache.insert("a.h".into(), session.parse("int a;").unwrap());
        let second = cache.insert("a.h".into(), session.parse("int b;").unwrap());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.source, "int a;");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/cpp-parser/missing.h");
        let err = parse_file(path, &Session::default(), &ParseCache::new()).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert_eq!(err.path(), path);
        assert!(err.to_string().starts_with("failed to read"));
    }
}
