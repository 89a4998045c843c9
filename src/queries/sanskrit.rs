//! Query catalogue for the Vedic Sanskrit corpus
//!
//! Candidates are tokens whose lemma belongs to the Sanskrit preverb
//! list. The nominal role is always an oblique noun or pronoun in the
//! accusative, locative or ablative.

use super::{MatchRecord, PatternQuery};
use crate::conditions::Conditions;
use crate::lexicon::PreverbLexicon;
use crate::nav::Counting;
use crate::sentence::{Sentence, Token};

/// The fixed Sanskrit catalogue, in reporting order.
pub fn catalogue() -> Vec<PatternQuery> {
    vec![
        PatternQuery::new(
            "noun_preverb_verb",
            "Query: three consecutive tokens (the verb is the noun's parent)\n\
             \tTOKEN 1: upos=NOUN or PRON; Case is Acc, Loc or Abl; deprel in the obl family\n\
             \tTOKEN 2: lemma in preverb list\n\
             \tTOKEN 3: upos=VERB",
            noun_preverb_verb,
        ),
        PatternQuery::new(
            "verb_preverb_noun",
            "Query: three consecutive tokens (the verb is the noun's parent)\n\
             \tTOKEN 1: upos=VERB\n\
             \tTOKEN 2: lemma in preverb list\n\
             \tTOKEN 3: upos=NOUN or PRON; Case is Acc, Loc or Abl; deprel in the obl family",
            verb_preverb_noun,
        ),
        PatternQuery::new(
            "preverb_noun_distant_verb",
            "Query: preverb-noun [...] verb; the verb is the noun's parent and follows later\n\
             \tTOKEN 1: lemma in preverb list\n\
             \tTOKEN 2: upos=NOUN or PRON; Case is Acc, Loc or Abl; deprel in the obl family\n\
             \tTOKEN 3: upos=VERB (TOKEN 2's parent, not immediately after it)",
            preverb_noun_distant_verb,
        ),
        PatternQuery::new(
            "orphaned_preverb",
            "Query: preverb cut off from a finite verb; the parent is any non-verb or a non-finite verb form\n\
             \tTOKEN 1: lemma in preverb list; deprel=orphan\n\
             \tTOKEN 2: TOKEN 1's parent; upos=any, or VERB with VerbForm in Part, Inf, Gdv, Conv",
            orphaned_preverb,
        ),
    ]
}

/// The nominal element shared by the positional queries.
fn oblique_nominal() -> Conditions {
    Conditions::new()
        .one_of("upos", ["NOUN", "PRON"])
        .one_of(
            "deprel",
            [
                "obl",
                "obl:source",
                "obl:goal",
                "obl:loc",
                "obl:path",
                "obl:manner",
                "obl:temp",
            ],
        )
        .one_of("Case", ["Acc", "Loc", "Abl"])
}

fn noun_preverb_verb<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if !lexicon.contains(&tok.lemma) {
        return None;
    }
    let left = sent.move_left(tok, Counting::Tokenized).ok()?;
    let right = sent.move_right(tok, Counting::Tokenized).ok()?;
    if !Conditions::new().is("upos", "VERB").matches(right) {
        return None;
    }
    if !oblique_nominal().matches(left) {
        return None;
    }
    let (noun, verb) = (left?, right?);
    if noun.head != verb.id.word() {
        return None;
    }
    Some(MatchRecord {
        preverb: Some(tok),
        noun: Some(noun),
        verb: Some(verb),
        sentence: sent,
    })
}

fn verb_preverb_noun<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if !lexicon.contains(&tok.lemma) {
        return None;
    }
    let left = sent.move_left(tok, Counting::Tokenized).ok()?;
    let right = sent.move_right(tok, Counting::Tokenized).ok()?;
    if !Conditions::new().is("upos", "VERB").matches(left) {
        return None;
    }
    if !oblique_nominal().matches(right) {
        return None;
    }
    let (verb, noun) = (left?, right?);
    if noun.head != verb.id.word() {
        return None;
    }
    Some(MatchRecord {
        preverb: Some(tok),
        noun: Some(noun),
        verb: Some(verb),
        sentence: sent,
    })
}

fn preverb_noun_distant_verb<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if !lexicon.contains(&tok.lemma) {
        return None;
    }
    let noun = sent.move_right(tok, Counting::Tokenized).ok()??;
    let verb = sent.parent(noun).ok()?;
    if !Conditions::new().is("upos", "VERB").matches(verb) {
        return None;
    }
    if !oblique_nominal().matches(Some(noun)) {
        return None;
    }
    let verb = verb?;
    // the verb follows the noun, but not immediately
    let after_noun = sent.move_right(noun, Counting::Tokenized).ok()?;
    if after_noun.map(|t| t.id) == Some(verb.id) {
        return None;
    }
    if verb.id.word()? <= noun.id.word()? {
        return None;
    }
    Some(MatchRecord {
        preverb: Some(tok),
        noun: Some(noun),
        verb: Some(verb),
        sentence: sent,
    })
}

fn orphaned_preverb<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if !lexicon.contains(&tok.lemma) {
        return None;
    }
    if !Conditions::new().is("deprel", "orphan").matches(Some(tok)) {
        return None;
    }
    let parent = sent.parent(tok).ok()?;
    if Conditions::new().is("upos", "VERB").matches(parent)
        && !Conditions::new()
            .one_of("VerbForm", ["Part", "Inf", "Gdv", "Conv"])
            .matches(parent)
    {
        // a finite verb governs the preverb: nothing stranded here
        return None;
    }
    Some(MatchRecord {
        preverb: Some(tok),
        noun: None,
        verb: parent,
        sentence: sent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::scan_sentence;
    use crate::sentence::Token;

    fn lexicon() -> PreverbLexicon {
        PreverbLexicon::vedic_sanskrit()
    }

    fn query(name: &str) -> PatternQuery {
        catalogue()
            .into_iter()
            .find(|q| q.name == name)
            .expect("unknown query name")
    }

    fn oblique(id: u32, form: &str, lemma: &str, head: u32) -> Token {
        Token::new(id, form, lemma, "NOUN", head, "obl").with_feat("Case", "Acc")
    }

    #[test]
    fn test_noun_preverb_verb_contiguous() {
        let sent = Sentence::new(vec![
            oblique(1, "agnim", "agni", 3),
            Token::new(2, "pra", "pra", "ADV", 3, "advmod"),
            Token::new(3, "vocam", "vac", "VERB", 0, "root"),
        ]);
        let records = scan_sentence(&query("noun_preverb_verb"), &sent, &lexicon());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].noun.unwrap().form, "agnim");
        assert_eq!(records[0].verb.unwrap().form, "vocam");
    }

    #[test]
    fn test_noun_preverb_verb_needs_verb_headed_noun() {
        // noun hangs off something other than the following verb
        let sent = Sentence::new(vec![
            oblique(1, "agnim", "agni", 2),
            Token::new(2, "pra", "pra", "ADV", 3, "advmod"),
            Token::new(3, "vocam", "vac", "VERB", 0, "root"),
        ]);
        assert!(scan_sentence(&query("noun_preverb_verb"), &sent, &lexicon()).is_empty());
    }

    #[test]
    fn test_noun_preverb_verb_requires_case() {
        let mut sent = Sentence::new(vec![
            oblique(1, "agnim", "agni", 3),
            Token::new(2, "pra", "pra", "ADV", 3, "advmod"),
            Token::new(3, "vocam", "vac", "VERB", 0, "root"),
        ]);
        sent.tokens[0].feats.insert("Case".into(), "Nom".into());
        assert!(scan_sentence(&query("noun_preverb_verb"), &sent, &lexicon()).is_empty());
    }

    #[test]
    fn test_verb_preverb_noun_contiguous() {
        let sent = Sentence::new(vec![
            Token::new(1, "gamat", "gam", "VERB", 0, "root"),
            Token::new(2, "upa", "upa", "ADV", 1, "advmod"),
            oblique(3, "yajñam", "yajña", 1),
        ]);
        let records = scan_sentence(&query("verb_preverb_noun"), &sent, &lexicon());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].verb.unwrap().form, "gamat");
        assert_eq!(records[0].noun.unwrap().form, "yajñam");
    }

    #[test]
    fn test_preverb_noun_distant_verb() {
        // pra(1) agnim(2, head 4) devam(3) vocam(4)
        let sent = Sentence::new(vec![
            Token::new(1, "pra", "pra", "ADV", 4, "advmod"),
            oblique(2, "agnim", "agni", 4),
            Token::new(3, "devam", "deva", "NOUN", 2, "appos"),
            Token::new(4, "vocam", "vac", "VERB", 0, "root"),
        ]);
        let records = scan_sentence(&query("preverb_noun_distant_verb"), &sent, &lexicon());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].noun.unwrap().form, "agnim");
        assert_eq!(records[0].verb.unwrap().form, "vocam");
    }

    #[test]
    fn test_preverb_noun_distant_verb_rejects_adjacent_verb() {
        let sent = Sentence::new(vec![
            Token::new(1, "pra", "pra", "ADV", 3, "advmod"),
            oblique(2, "agnim", "agni", 3),
            Token::new(3, "vocam", "vac", "VERB", 0, "root"),
        ]);
        assert!(scan_sentence(&query("preverb_noun_distant_verb"), &sent, &lexicon()).is_empty());
    }

    #[test]
    fn test_orphaned_preverb_matches_non_verb_parent() {
        let sent = Sentence::new(vec![
            Token::new(1, "vi", "vi", "ADV", 2, "orphan"),
            Token::new(2, "vayam", "tvad", "PRON", 0, "root"),
        ]);
        let records = scan_sentence(&query("orphaned_preverb"), &sent, &lexicon());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].verb.unwrap().form, "vayam");
        assert_eq!(records[0].noun, None);
    }

    #[test]
    fn test_orphaned_preverb_matches_participle_parent() {
        let sent = Sentence::new(vec![
            Token::new(1, "vi", "vi", "ADV", 2, "orphan"),
            Token::new(2, "gacchant-", "gam", "VERB", 0, "root").with_feat("VerbForm", "Part"),
        ]);
        assert_eq!(
            scan_sentence(&query("orphaned_preverb"), &sent, &lexicon()).len(),
            1
        );
    }

    #[test]
    fn test_orphaned_preverb_rejects_finite_verb_parent() {
        let sent = Sentence::new(vec![
            Token::new(1, "vi", "vi", "ADV", 2, "orphan"),
            Token::new(2, "gacchati", "gam", "VERB", 0, "root").with_feat("VerbForm", "Fin"),
        ]);
        assert!(scan_sentence(&query("orphaned_preverb"), &sent, &lexicon()).is_empty());
    }

    #[test]
    fn test_orphaned_preverb_requires_orphan_relation() {
        let sent = Sentence::new(vec![
            Token::new(1, "vi", "vi", "ADV", 2, "advmod"),
            Token::new(2, "vayam", "tvad", "PRON", 0, "root"),
        ]);
        assert!(scan_sentence(&query("orphaned_preverb"), &sent, &lexicon()).is_empty());
    }
}
