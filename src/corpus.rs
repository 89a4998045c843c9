//! Treebank collections
//!
//! Convenient iteration over the sentences of a corpus held in a
//! string, a single file, or a set of files (explicit paths or a glob
//! pattern). Unreadable files and malformed sentences are logged and
//! skipped; iterating a corpus never aborts on a single bad entry.

use crate::conllu::{ParseError, SentenceReader};
use crate::sentence::Sentence;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
enum Source {
    /// In-memory CoNLL-U text
    Text(String),
    /// Single file path
    File(PathBuf),
    /// Multiple file paths (from a glob or given explicitly)
    Files(Vec<PathBuf>),
}

/// A corpus of dependency-annotated sentences.
///
/// # Examples
///
/// ```no_run
/// use preverbs::Treebank;
///
/// for sentence in Treebank::from_file("iliad.conllu") {
///     println!("{} tokens", sentence.tokens.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Treebank {
    source: Source,
}

impl Treebank {
    /// Corpus from an in-memory CoNLL-U string.
    pub fn from_string(text: &str) -> Self {
        Self {
            source: Source::Text(text.to_string()),
        }
    }

    /// Corpus from a single file path (plain or `.gz`).
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
        }
    }

    /// Corpus from a glob pattern. Files are visited in sorted order
    /// for deterministic results.
    pub fn from_glob(pattern: &str) -> Result<Self, glob::PatternError> {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)?.filter_map(Result::ok).collect();
        paths.sort();
        Ok(Self::from_paths(paths))
    }

    /// Corpus from explicit file paths, visited in the given order.
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            source: Source::Files(paths),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = Sentence>> {
        self.clone().into_iter()
    }
}

impl IntoIterator for Treebank {
    type Item = Sentence;
    type IntoIter = Box<dyn Iterator<Item = Sentence>>;

    fn into_iter(self) -> Self::IntoIter {
        match self.source {
            Source::Text(text) => Box::new(SentenceReader::from_str(&text).filter_map(keep_ok)),
            Source::File(path) => open_file(path),
            Source::Files(paths) => Box::new(paths.into_iter().flat_map(open_file)),
        }
    }
}

fn keep_ok(result: Result<Sentence, ParseError>) -> Option<Sentence> {
    match result {
        Ok(sent) => Some(sent),
        Err(e) => {
            warn!(error = %e, "skipping malformed sentence");
            None
        }
    }
}

fn open_file(path: PathBuf) -> Box<dyn Iterator<Item = Sentence>> {
    match SentenceReader::from_file(&path) {
        Ok(reader) => Box::new(reader.filter_map(keep_ok)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to open corpus file");
            Box::new(std::iter::empty())
        }
    }
}
