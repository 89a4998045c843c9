//! Token and sentence data structures
//!
//! A sentence is the flat, position-indexed token list exactly as it
//! appears in the source file: multi-word span markers interleaved with
//! the sub-tokens they cover, empty nodes included. The dependency tree
//! is never stored; it is reconstructed on demand by the navigation
//! layer (see `nav`) from the 1-based `head` references.

use rustc_hash::FxHashMap;
use std::fmt;

/// Morphological features (the FEATS column), keyed by feature name.
pub type Features = FxHashMap<String, String>;

/// Miscellaneous annotations (the MISC column), keyed by annotation name.
pub type Misc = FxHashMap<String, String>;

/// Identifier of a token within its sentence.
///
/// Ordinary tokens carry a single 1-based index. A multi-word span
/// marker `4-5` covers the sub-tokens 4 and 5 that follow it; an empty
/// node `2.1` hangs between ordinary positions. The separator character
/// of the source notation is the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenId {
    /// Ordinary token: `3`
    Single(u32),
    /// Multi-word span marker: `4-5`
    Range(u32, u32),
    /// Empty node: `2.1`
    Decimal(u32, u32),
}

impl TokenId {
    /// The plain index of an ordinary token, `None` for span markers
    /// and empty nodes.
    pub fn word(&self) -> Option<u32> {
        match self {
            TokenId::Single(n) => Some(*n),
            _ => None,
        }
    }

}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenId::Single(n) => write!(f, "{}", n),
            TokenId::Range(start, end) => write!(f, "{}-{}", start, end),
            TokenId::Decimal(main, sub) => write!(f, "{}.{}", main, sub),
        }
    }
}

/// A single annotated token: word, punctuation mark, span marker, or
/// empty node.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: Option<String>,
    pub feats: Features,
    /// 1-based identifier of the syntactic parent; `None` for the root
    /// and for tokens with no head annotation (span markers).
    pub head: Option<u32>,
    pub deprel: String,
    pub misc: Misc,
}

impl Token {
    /// Create an ordinary token. A `head` of 0 means root.
    pub fn new(id: u32, form: &str, lemma: &str, upos: &str, head: u32, deprel: &str) -> Self {
        Self {
            id: TokenId::Single(id),
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos: upos.to_string(),
            xpos: None,
            feats: Features::default(),
            head: if head > 0 { Some(head) } else { None },
            deprel: deprel.to_string(),
            misc: Misc::default(),
        }
    }

    /// Create a multi-word span marker covering `start..=end`.
    pub fn span(start: u32, end: u32, form: &str) -> Self {
        Self {
            id: TokenId::Range(start, end),
            form: form.to_string(),
            lemma: form.to_string(),
            upos: "_".to_string(),
            xpos: None,
            feats: Features::default(),
            head: None,
            deprel: "_".to_string(),
            misc: Misc::default(),
        }
    }

    /// Add a morphological feature (builder style).
    pub fn with_feat(mut self, key: &str, value: &str) -> Self {
        self.feats.insert(key.to_string(), value.to_string());
        self
    }

    /// Add a miscellaneous annotation (builder style).
    pub fn with_misc(mut self, key: &str, value: &str) -> Self {
        self.misc.insert(key.to_string(), value.to_string());
        self
    }

    /// True iff this token is a span marker or an empty node rather
    /// than an ordinary integer-identified token.
    pub fn is_multiword(&self) -> bool {
        !matches!(self.id, TokenId::Single(_))
    }

    /// Look up a morphological feature value.
    pub fn feat(&self, key: &str) -> Option<&str> {
        self.feats.get(key).map(String::as_str)
    }

    /// Look up a miscellaneous annotation value.
    pub fn misc_value(&self, key: &str) -> Option<&str> {
        self.misc.get(key).map(String::as_str)
    }
}

/// A sentence: ordered tokens plus source-level metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    pub tokens: Vec<Token>,
    /// Raw surface text of the sentence, when the source provides it.
    pub text: Option<String>,
    /// Remaining comment metadata (`sent_id` and friends).
    pub metadata: FxHashMap<String, String>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            text: None,
            metadata: FxHashMap::default(),
        }
    }

    pub fn with_metadata(
        tokens: Vec<Token>,
        text: Option<String>,
        metadata: FxHashMap<String, String>,
    ) -> Self {
        Self {
            tokens,
            text,
            metadata,
        }
    }

    /// The sentence identifier from the source metadata, if any.
    pub fn sent_id(&self) -> Option<&str> {
        self.metadata.get("sent_id").map(String::as_str)
    }

    /// Find the ordinary token with the given 1-based identifier.
    pub fn get(&self, id: u32) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == TokenId::Single(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_display() {
        assert_eq!(TokenId::Single(3).to_string(), "3");
        assert_eq!(TokenId::Range(4, 5).to_string(), "4-5");
        assert_eq!(TokenId::Decimal(2, 1).to_string(), "2.1");
    }

    #[test]
    fn test_is_multiword() {
        assert!(!Token::new(1, "canta", "cantar", "VERB", 0, "root").is_multiword());
        assert!(Token::span(4, 5, "del").is_multiword());
    }

    #[test]
    fn test_head_zero_is_root() {
        let root = Token::new(3, "runs", "run", "VERB", 0, "root");
        assert_eq!(root.head, None);
        let child = Token::new(1, "dog", "dog", "NOUN", 3, "nsubj");
        assert_eq!(child.head, Some(3));
    }

    #[test]
    fn test_get_by_id_skips_span_markers() {
        let sent = Sentence::new(vec![
            Token::new(3, "a", "a", "DET", 4, "det"),
            Token::span(4, 5, "del"),
            Token::new(4, "de", "de", "ADP", 6, "case"),
            Token::new(5, "el", "el", "DET", 6, "det"),
        ]);
        assert_eq!(sent.get(4).unwrap().form, "de");
        assert_eq!(sent.get(7), None);
    }

    #[test]
    fn test_builder_feats_and_misc() {
        let tok = Token::new(2, "agnim", "agni", "NOUN", 3, "obj")
            .with_feat("Case", "Acc")
            .with_misc("Ref", "RV.1.1.1");
        assert_eq!(tok.feat("Case"), Some("Acc"));
        assert_eq!(tok.misc_value("Ref"), Some("RV.1.1.1"));
        assert_eq!(tok.feat("Number"), None);
    }
}
