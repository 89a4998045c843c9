//! Tree navigation primitives
//!
//! Structural and positional queries over a single sentence: parent,
//! children, siblings, ancestor and descendant walks, and linear
//! left/right movement that understands multi-word spans. The parent
//! relation is resolved by scanning the sentence for the matching head
//! identifier; no tree structure is cached between queries.
//!
//! Failure model: asking about a token that is not part of the supplied
//! sentence is a caller error (`NavError::NotInSentence`). Running off
//! either edge of the sentence, or moving in a mode the token's kind
//! does not support, is recovered to `Ok(None)`; mode mismatches are
//! additionally logged at debug level.

use crate::sentence::{Sentence, Token, TokenId};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, warn};

/// Navigation failure surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("token '{token}' is not part of sentence {sent_id}")]
    NotInSentence { token: String, sent_id: String },
}

impl NavError {
    fn not_in(token: &Token, sent: &Sentence) -> Self {
        NavError::NotInSentence {
            token: token.form.clone(),
            sent_id: sent.sent_id().unwrap_or("<no id>").to_string(),
        }
    }
}

/// Which notion of linear position a movement or length query uses.
///
/// `Tokenized` works over the split sub-words: span markers have no
/// position of their own and bound sub-tokens count individually.
/// `Words` works over the source words: a multi-word span counts as a
/// single unit and its bound sub-tokens are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Counting {
    #[default]
    Tokenized,
    Words,
}

impl Sentence {
    /// Position of `token` in the flat token list.
    ///
    /// Identifiers are unique within a sentence (a span marker and its
    /// sub-tokens have distinct identifier kinds), so lookup is by id.
    pub fn position_of(&self, token: &Token) -> Result<usize, NavError> {
        self.tokens
            .iter()
            .position(|t| t.id == token.id)
            .ok_or_else(|| NavError::not_in(token, self))
    }

    /// The token's syntactic parent, or `None` for the root and for
    /// tokens without a head annotation.
    pub fn parent(&self, token: &Token) -> Result<Option<&Token>, NavError> {
        self.position_of(token)?;
        match token.head {
            Some(head) => Ok(self.get(head)),
            None => Ok(None),
        }
    }

    /// All tokens whose head is `token`, in sentence order.
    pub fn children(&self, token: &Token) -> Result<Vec<&Token>, NavError> {
        self.position_of(token)?;
        let Some(id) = token.id.word() else {
            return Ok(Vec::new());
        };
        Ok(self.tokens.iter().filter(|t| t.head == Some(id)).collect())
    }

    /// All other tokens sharing `token`'s head, in sentence order.
    /// The queried token itself is not included. Empty for the root
    /// and for headless tokens.
    pub fn siblings(&self, token: &Token) -> Result<Vec<&Token>, NavError> {
        let pos = self.position_of(token)?;
        let Some(head) = token.head else {
            return Ok(Vec::new());
        };
        Ok(self
            .tokens
            .iter()
            .enumerate()
            .filter(|(i, t)| *i != pos && t.head == Some(head))
            .map(|(_, t)| t)
            .collect())
    }

    /// The walk from `token` up to the root, nearest parent first.
    ///
    /// A head cycle ends the walk at the point of repetition instead of
    /// looping.
    pub fn ancestors(&self, token: &Token) -> Result<Vec<&Token>, NavError> {
        self.position_of(token)?;
        let mut ancestors: Vec<&Token> = Vec::new();
        let mut seen = vec![token.id];
        let mut current = token;
        while let Some(parent) = self.parent(current)? {
            if seen.contains(&parent.id) {
                warn!(
                    token = %parent.id,
                    sent_id = sentence_label(self),
                    "head cycle detected; truncating ancestor walk"
                );
                break;
            }
            seen.push(parent.id);
            ancestors.push(parent);
            current = parent;
        }
        Ok(ancestors)
    }

    /// Positions of every token transitively headed by `token`, in
    /// breadth-first order.
    ///
    /// Built from a single head-to-children pass over the whole
    /// sentence rather than repeated `children` scans.
    pub fn descendant_positions(&self, token: &Token) -> Result<Vec<usize>, NavError> {
        let pos = self.position_of(token)?;

        let mut child_map: FxHashMap<u32, Vec<usize>> = FxHashMap::default();
        for (i, t) in self.tokens.iter().enumerate() {
            if let Some(head) = t.head {
                child_map.entry(head).or_default().push(i);
            }
        }

        let mut result = Vec::new();
        let mut visited = vec![false; self.tokens.len()];
        visited[pos] = true;
        let mut queue = VecDeque::from([pos]);
        while let Some(i) = queue.pop_front() {
            let Some(id) = self.tokens[i].id.word() else {
                continue;
            };
            let Some(kids) = child_map.get(&id) else {
                continue;
            };
            for &k in kids {
                if visited[k] {
                    warn!(
                        token = %self.tokens[k].id,
                        sent_id = sentence_label(self),
                        "head cycle detected; skipping repeated descendant"
                    );
                    continue;
                }
                visited[k] = true;
                result.push(k);
                queue.push_back(k);
            }
        }
        Ok(result)
    }

    /// Every token transitively headed by `token`, breadth-first.
    pub fn descendants(&self, token: &Token) -> Result<Vec<&Token>, NavError> {
        Ok(self
            .descendant_positions(token)?
            .into_iter()
            .map(|i| &self.tokens[i])
            .collect())
    }

    /// True iff `token` is a span marker, or a sub-token absorbed into
    /// an earlier multi-word span (and thus skipped by word-level
    /// counting).
    pub fn is_bounded(&self, token: &Token) -> Result<bool, NavError> {
        let pos = self.position_of(token)?;
        Ok(self.bounded_at(pos))
    }

    fn bounded_at(&self, pos: usize) -> bool {
        let id = match self.tokens[pos].id {
            TokenId::Single(n) => n,
            _ => return true,
        };
        // Backward scan: the nearest preceding span whose range covers
        // this id decides.
        self.tokens[..pos]
            .iter()
            .rev()
            .any(|t| matches!(t.id, TokenId::Range(start, end) if start <= id && id <= end))
    }

    /// Sentence length under the given counting mode.
    ///
    /// Two legitimate lengths coexist: the number of split sub-words
    /// (`Tokenized`) and the number of source words before splitting
    /// (`Words`).
    pub fn len_in(&self, counting: Counting) -> usize {
        let mut tokenized = 0;
        let mut words = 0;
        for (i, t) in self.tokens.iter().enumerate() {
            if t.is_multiword() {
                words += 1;
            } else if self.bounded_at(i) {
                tokenized += 1;
            } else {
                tokenized += 1;
                words += 1;
            }
        }
        match counting {
            Counting::Tokenized => tokenized,
            Counting::Words => words,
        }
    }

    /// The next token to the right, or `None` at the sentence edge.
    ///
    /// In `Tokenized` mode the neighbour is the token with identifier
    /// exactly one higher; span markers have no tokenized position and
    /// moving from one is a logged no-op. In `Words` mode a span counts
    /// as a single unit sitting where its sub-tokens are, and moving
    /// from a bound sub-token is a logged no-op.
    pub fn move_right(&self, token: &Token, counting: Counting) -> Result<Option<&Token>, NavError> {
        let pos = self.position_of(token)?;
        match counting {
            Counting::Tokenized => {
                let Some(id) = token.id.word() else {
                    debug!(token = %token.id, "tokenized move from a span marker; no neighbour");
                    return Ok(None);
                };
                Ok(self.tokens[pos..]
                    .iter()
                    .find(|t| t.id == TokenId::Single(id + 1)))
            }
            Counting::Words => {
                let start = match token.id {
                    TokenId::Range(_, end) | TokenId::Decimal(_, end) => end,
                    TokenId::Single(n) => {
                        if self.bounded_at(pos) {
                            debug!(token = %token.id, "word move from a bound sub-token; no neighbour");
                            return Ok(None);
                        }
                        n
                    }
                };
                for i in pos..self.tokens.len() {
                    let t = &self.tokens[i];
                    match t.id {
                        TokenId::Range(s, _) | TokenId::Decimal(s, _) if s == start + 1 => {
                            return Ok(Some(t));
                        }
                        TokenId::Single(n) if n == start + 1 && !self.bounded_at(i) => {
                            return Ok(Some(t));
                        }
                        _ => {}
                    }
                }
                Ok(None)
            }
        }
    }

    /// The next token to the left, or `None` at the sentence edge.
    /// Mirror of [`Sentence::move_right`].
    pub fn move_left(&self, token: &Token, counting: Counting) -> Result<Option<&Token>, NavError> {
        let pos = self.position_of(token)?;
        match counting {
            Counting::Tokenized => {
                let Some(id) = token.id.word() else {
                    debug!(token = %token.id, "tokenized move from a span marker; no neighbour");
                    return Ok(None);
                };
                let Some(target) = id.checked_sub(1) else {
                    return Ok(None);
                };
                Ok(self.tokens[..pos]
                    .iter()
                    .rev()
                    .find(|t| t.id == TokenId::Single(target)))
            }
            Counting::Words => {
                let start = match token.id {
                    TokenId::Range(first, _) | TokenId::Decimal(first, _) => first,
                    TokenId::Single(n) => {
                        if self.bounded_at(pos) {
                            debug!(token = %token.id, "word move from a bound sub-token; no neighbour");
                            return Ok(None);
                        }
                        n
                    }
                };
                let Some(target) = start.checked_sub(1) else {
                    return Ok(None);
                };
                for i in (0..pos).rev() {
                    let t = &self.tokens[i];
                    match t.id {
                        TokenId::Range(_, e) | TokenId::Decimal(_, e) if e == target => {
                            return Ok(Some(t));
                        }
                        TokenId::Single(n) if n == target && !self.bounded_at(i) => {
                            return Ok(Some(t));
                        }
                        _ => {}
                    }
                }
                Ok(None)
            }
        }
    }

    /// The token `distance` positions away: negative moves left,
    /// positive moves right, zero returns the token itself. `None` as
    /// soon as an edge is reached before covering the full distance.
    pub fn move_by(
        &self,
        token: &Token,
        distance: isize,
        counting: Counting,
    ) -> Result<Option<&Token>, NavError> {
        let pos = self.position_of(token)?;
        let mut current = &self.tokens[pos];
        for _ in 0..distance.unsigned_abs() {
            let next = if distance > 0 {
                self.move_right(current, counting)?
            } else {
                self.move_left(current, counting)?
            };
            match next {
                Some(t) => current = t,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

fn sentence_label(sent: &Sentence) -> &str {
    sent.sent_id().unwrap_or("<no id>")
}
