//! Preverbs: dependency-treebank queries for verbal preverb constructions
//!
//! A toolkit for finding adpositions, adverbs and particles that act as
//! preverbs in dependency-parsed corpora. The navigation layer answers
//! structural and positional questions about tokens (with full
//! multi-word-span awareness); the query layer composes those
//! primitives into per-language catalogues of structural patterns.

pub mod conditions; // Attribute/feature constraint matching
pub mod conllu; // CoNLL-U corpus parsing
pub mod corpus; // Treebank collections over strings, files, globs
pub mod lexicon; // Per-language preverb lemma lists
pub mod nav; // Tree navigation primitives
pub mod queries; // Per-language pattern catalogues
pub mod report; // Plain-text report rendering
pub mod sentence; // Token and sentence data structures

// Re-exports for convenience
pub use conditions::{CondValue, Conditions};
pub use conllu::{ParseError, SentenceReader};
pub use corpus::Treebank;
pub use lexicon::PreverbLexicon;
pub use nav::{Counting, NavError};
pub use queries::{MatchRecord, PatternQuery, QueryMatches, scan_corpus, scan_sentence};
pub use sentence::{Features, Misc, Sentence, Token, TokenId};
