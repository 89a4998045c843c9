//! CoNLL-U corpus parsing
//!
//! Parses CoNLL-U text into [`Sentence`] values: one line per token
//! with ten tab-separated fields, `#` comment lines carrying sentence
//! metadata, blank lines separating sentences.
//!
//! Multi-word span markers (`4-5`) and empty nodes (`2.1`) are kept in
//! the token sequence at their source positions; the navigation layer
//! depends on seeing them. Head identifiers stay 1-based exactly as
//! annotated.
//!
//! CoNLL-U format: <https://universaldependencies.org/format.html>

use crate::sentence::{Features, Sentence, Token, TokenId};
use flate2::read::GzDecoder;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use thiserror::Error;

/// Error during CoNLL-U parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected 10 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid token id '{value}'")]
    InvalidId { line: usize, value: String },

    #[error("line {line}: invalid head '{value}'")]
    InvalidHead { line: usize, value: String },

    #[error("line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Reader that iterates over the sentences of a CoNLL-U stream.
pub struct SentenceReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}

impl<R: BufRead> SentenceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl SentenceReader<Box<dyn BufRead>> {
    /// Open a corpus file; `.gz` files are decompressed transparently.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl SentenceReader<BufReader<std::io::Cursor<String>>> {
    /// Read sentences from an in-memory CoNLL-U string.
    pub fn from_str(text: &str) -> Self {
        let cursor = std::io::Cursor::new(text.to_string());
        Self::new(BufReader::new(cursor))
    }
}

impl<R: BufRead> Iterator for SentenceReader<R> {
    type Item = Result<Sentence, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token_lines = Vec::new();
        let mut metadata = FxHashMap::default();
        let mut text = None;

        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    if token_lines.is_empty() {
                        return None;
                    }
                    // last sentence without a trailing blank line
                    break;
                }
                Some(Err(e)) => {
                    return Some(Err(ParseError::Io {
                        line: self.line_num,
                        source: e,
                    }));
                }
                Some(Ok(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        if !token_lines.is_empty() {
                            break;
                        }
                        continue;
                    }
                    if let Some(comment) = line.strip_prefix('#') {
                        parse_comment(comment, &mut metadata, &mut text);
                        continue;
                    }
                    token_lines.push((self.line_num, line.to_string()));
                }
            }
        }

        let mut tokens = Vec::with_capacity(token_lines.len());
        for (line_num, line) in token_lines {
            match parse_token(&line, line_num) {
                Ok(token) => tokens.push(token),
                Err(e) => return Some(Err(e)),
            }
        }
        Some(Ok(Sentence::with_metadata(tokens, text, metadata)))
    }
}

/// Comment lines use `key = value`; `text` is pulled out separately.
fn parse_comment(
    comment: &str,
    metadata: &mut FxHashMap<String, String>,
    text: &mut Option<String>,
) {
    let comment = comment.trim();
    if let Some(eq_pos) = comment.find('=') {
        let key = comment[..eq_pos].trim();
        let value = comment[eq_pos + 1..].trim();
        if key == "text" {
            *text = Some(value.to_string());
        } else {
            metadata.insert(key.to_string(), value.to_string());
        }
    }
}

/// Parse a single ten-field token line.
fn parse_token(line: &str, line_num: usize) -> Result<Token, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 10 {
        return Err(ParseError::FieldCount {
            line: line_num,
            found: fields.len(),
        });
    }

    let id = parse_id(fields[0], line_num)?;
    let form = fields[1].to_string();
    let lemma = if fields[2] == "_" && !form.is_empty() {
        form.clone()
    } else {
        fields[2].to_string()
    };
    let upos = fields[3].to_string();
    let xpos = if fields[4] == "_" {
        None
    } else {
        Some(fields[4].to_string())
    };
    let feats = parse_pairs(fields[5]);
    let head = parse_head(fields[6], line_num)?;
    let deprel = fields[7].to_string();
    // field 8 (DEPS, enhanced dependencies) is accepted and ignored
    let misc = parse_pairs(fields[9]);

    Ok(Token {
        id,
        form,
        lemma,
        upos,
        xpos,
        feats,
        head,
        deprel,
        misc,
    })
}

/// ID field: `3`, `4-5`, or `2.1`.
fn parse_id(s: &str, line_num: usize) -> Result<TokenId, ParseError> {
    let invalid = || ParseError::InvalidId {
        line: line_num,
        value: s.to_string(),
    };

    if let Some((start, end)) = s.split_once('-') {
        let start = start.parse().map_err(|_| invalid())?;
        let end = end.parse().map_err(|_| invalid())?;
        Ok(TokenId::Range(start, end))
    } else if let Some((main, sub)) = s.split_once('.') {
        let main = main.parse().map_err(|_| invalid())?;
        let sub = sub.parse().map_err(|_| invalid())?;
        Ok(TokenId::Decimal(main, sub))
    } else {
        Ok(TokenId::Single(s.parse().map_err(|_| invalid())?))
    }
}

/// HEAD field: `0` and `_` mean no parent. Identifiers are kept
/// 1-based; the navigation layer resolves them against token ids.
fn parse_head(s: &str, line_num: usize) -> Result<Option<u32>, ParseError> {
    if s == "0" || s == "_" {
        return Ok(None);
    }
    let head: u32 = s.parse().map_err(|_| ParseError::InvalidHead {
        line: line_num,
        value: s.to_string(),
    })?;
    Ok(Some(head))
}

/// FEATS/MISC field: `Key=Value|Key=Value`, `_` for empty. Entries
/// without `=` are ignored.
fn parse_pairs(s: &str) -> Features {
    let mut map = Features::default();
    if s == "_" {
        return map;
    }
    for pair in s.split('|') {
        if let Some((key, value)) = pair.split_once('=') {
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}
