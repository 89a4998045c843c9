//! Attribute and feature constraint matching
//!
//! A [`Conditions`] value is a conjunction of per-key checks evaluated
//! against a token. Each key is resolved through an ordered chain of
//! lookup tiers: the token's top-level fields first, then its
//! morphological features, then its miscellaneous annotations. The
//! first tier that holds the key settles the comparison; a key held by
//! no tier fails the whole conjunction.

use crate::sentence::Token;

/// Acceptable value(s) for one constrained key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CondValue {
    /// The held value must equal this string exactly.
    Is(String),
    /// The held value must be one of these strings.
    In(Vec<String>),
}

impl CondValue {
    fn accepts(&self, value: &str) -> bool {
        match self {
            CondValue::Is(want) => value == want,
            CondValue::In(options) => options.iter().any(|o| o == value),
        }
    }
}

/// How one lookup tier answers for a key.
enum Lookup<'t> {
    /// This tier does not know the key; try the next tier.
    NotHere,
    /// This tier owns the key; `None` means the token has no value for
    /// it (an unset optional field), which fails the check.
    Held(Option<&'t str>),
}

type Tier = for<'t> fn(&'t Token, &str) -> Lookup<'t>;

/// Top-level token fields addressable by name.
fn field_tier<'t>(token: &'t Token, key: &str) -> Lookup<'t> {
    match key {
        "form" => Lookup::Held(Some(&token.form)),
        "lemma" => Lookup::Held(Some(&token.lemma)),
        "upos" => Lookup::Held(Some(&token.upos)),
        "xpos" => Lookup::Held(token.xpos.as_deref()),
        "deprel" => Lookup::Held(Some(&token.deprel)),
        _ => Lookup::NotHere,
    }
}

fn feats_tier<'t>(token: &'t Token, key: &str) -> Lookup<'t> {
    match token.feat(key) {
        Some(v) => Lookup::Held(Some(v)),
        None => Lookup::NotHere,
    }
}

fn misc_tier<'t>(token: &'t Token, key: &str) -> Lookup<'t> {
    match token.misc_value(key) {
        Some(v) => Lookup::Held(Some(v)),
        None => Lookup::NotHere,
    }
}

/// Lookup tiers in priority order. New tiers slot in here without
/// touching the evaluation logic.
const TIERS: [Tier; 3] = [field_tier, feats_tier, misc_tier];

/// A conjunction of key/value constraints over a token.
///
/// An empty `Conditions` matches any present token; an absent token
/// (`None`) never matches.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    checks: Vec<(String, CondValue)>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to hold exactly `value`.
    pub fn is(mut self, key: &str, value: &str) -> Self {
        self.checks
            .push((key.to_string(), CondValue::Is(value.to_string())));
        self
    }

    /// Require `key` to hold one of `values`.
    pub fn one_of<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks.push((
            key.to_string(),
            CondValue::In(values.into_iter().map(Into::into).collect()),
        ));
        self
    }

    /// Evaluate every check against `token`; all must pass.
    pub fn matches(&self, token: Option<&Token>) -> bool {
        let Some(token) = token else {
            return false;
        };
        self.checks.iter().all(|(key, want)| {
            for tier in TIERS {
                match tier(token, key) {
                    Lookup::Held(Some(value)) => return want.accepts(value),
                    Lookup::Held(None) => return false,
                    Lookup::NotHere => {}
                }
            }
            false
        })
    }
}
