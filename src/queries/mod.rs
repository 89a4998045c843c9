//! Structural queries for preverb constructions
//!
//! Each corpus has a fixed catalogue of named queries. A query is a
//! pure function of one candidate token and its sentence: it first
//! filters on the preverb lexicon, then composes navigation primitives
//! and condition checks, and either binds the roles it defines into a
//! [`MatchRecord`] or yields nothing. Evaluation never mutates the
//! sentence and never aborts neighbouring tokens' queries.

pub mod greek;
pub mod sanskrit;

use crate::lexicon::PreverbLexicon;
use crate::sentence::{Sentence, Token};

/// Roles bound by a successful match. Roles a query does not define
/// stay `None`; they are always present, never omitted.
#[derive(Debug, Clone)]
pub struct MatchRecord<'a> {
    pub preverb: Option<&'a Token>,
    pub noun: Option<&'a Token>,
    pub verb: Option<&'a Token>,
    pub sentence: &'a Sentence,
}

/// Matcher signature shared by every query in every catalogue.
pub type MatcherFn =
    for<'a> fn(&'a Token, &'a Sentence, &PreverbLexicon) -> Option<MatchRecord<'a>>;

/// A named structural query over a token in its sentence.
#[derive(Debug, Clone, Copy)]
pub struct PatternQuery {
    /// Short identifier, used in report file names.
    pub name: &'static str,
    /// Human-readable statement of the pattern, used as report header.
    pub description: &'static str,
    matcher: MatcherFn,
}

impl PatternQuery {
    pub const fn new(name: &'static str, description: &'static str, matcher: MatcherFn) -> Self {
        Self {
            name,
            description,
            matcher,
        }
    }

    /// Evaluate this query on one candidate token.
    pub fn matches<'a>(
        &self,
        token: &'a Token,
        sent: &'a Sentence,
        lexicon: &PreverbLexicon,
    ) -> Option<MatchRecord<'a>> {
        (self.matcher)(token, sent, lexicon)
    }
}

/// All matches of `query` in `sent`, in token order.
pub fn scan_sentence<'a>(
    query: &PatternQuery,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Vec<MatchRecord<'a>> {
    sent.tokens
        .iter()
        .filter_map(|tok| query.matches(tok, sent, lexicon))
        .collect()
}

/// The matches of one query across a whole corpus, in corpus order.
#[derive(Debug, Clone)]
pub struct QueryMatches<'a> {
    pub query: PatternQuery,
    pub records: Vec<MatchRecord<'a>>,
}

/// Evaluate every query of a catalogue over every (token, sentence)
/// pair, accumulating per-query match lists.
pub fn scan_corpus<'a>(
    queries: &[PatternQuery],
    sentences: &'a [Sentence],
    lexicon: &PreverbLexicon,
) -> Vec<QueryMatches<'a>> {
    queries
        .iter()
        .map(|query| QueryMatches {
            query: *query,
            records: sentences
                .iter()
                .flat_map(|sent| scan_sentence(query, sent, lexicon))
                .collect(),
        })
        .collect()
}
