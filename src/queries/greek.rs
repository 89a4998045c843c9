//! Query catalogue for the Ancient Greek epic corpora
//!
//! Candidates are adverbs/adpositions whose lemma belongs to the Greek
//! preverb list; every query additionally requires the candidate not to
//! be absorbed into a multi-word span.

use super::{MatchRecord, PatternQuery};
use crate::conditions::Conditions;
use crate::lexicon::PreverbLexicon;
use crate::nav::Counting;
use crate::sentence::{Sentence, Token};

/// The fixed Greek catalogue, in reporting order.
pub fn catalogue() -> Vec<PatternQuery> {
    vec![
        PatternQuery::new(
            "adverb_verb",
            "Query: two tokens - adverb (lemma in preverb list) and verb (the adverb's parent)\n\
             \tTOKEN 1: upos=ADV (head = TOKEN 2)\n\
             \tTOKEN 2: upos=VERB",
            adverb_heads_verb,
        ),
        PatternQuery::new(
            "adposition_distant_noun",
            "Query: three tokens - verb (the noun's parent), adposition, noun (the adposition's parent);\n\
             the noun follows the adposition, but not immediately, with none of its other dependents between\n\
             \tTOKEN 1: upos=VERB\n\
             \tTOKEN 2: upos=ADP (head = TOKEN 3)\n\
             \tTOKEN 3: upos=NOUN or PRON; deprel is obl, obl:arg or advmod (head = TOKEN 1)",
            adposition_separated_from_noun,
        ),
        PatternQuery::new(
            "adp_noun_verb",
            "Query: three consecutive tokens - adposition, noun, verb\n\
             \tTOKEN 1: lemma in preverb list\n\
             \tTOKEN 2: upos=NOUN or PRON\n\
             \tTOKEN 3: upos=VERB",
            adposition_noun_verb,
        ),
        PatternQuery::new(
            "adp_noun_verb_unattached",
            "Query: three consecutive tokens - adposition, noun, verb\n\
             \tTOKEN 1: lemma in preverb list\n\
             \tTOKEN 2: upos=NOUN or PRON (is not TOKEN 1's head)\n\
             \tTOKEN 3: upos=VERB",
            adposition_noun_verb_unattached,
        ),
        PatternQuery::new(
            "adp_noun_verb_object",
            "Query: three consecutive tokens - adposition, noun, verb\n\
             \tTOKEN 1: lemma in preverb list\n\
             \tTOKEN 2: upos=NOUN or PRON; deprel is obj or obl (head = TOKEN 3)\n\
             \tTOKEN 3: upos=VERB",
            adposition_noun_verb_object,
        ),
        PatternQuery::new(
            "stranded_particle",
            "Query: two tokens - particle (lemma in preverb list) and noun or pronoun (the particle's parent)\n\
             \tTOKEN 1: lemma in preverb list; deprel=compound:prt (head = TOKEN 2)\n\
             \tTOKEN 2: upos is NOUN or PRON; deprel is advcl or conj",
            stranded_particle,
        ),
    ]
}

fn adverb_heads_verb<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if sent.is_bounded(tok).ok()? || !lexicon.contains(&tok.lemma) {
        return None;
    }
    if !Conditions::new().is("upos", "ADV").matches(Some(tok)) {
        return None;
    }
    let parent = sent.parent(tok).ok()?;
    if !Conditions::new().is("upos", "VERB").matches(parent) {
        return None;
    }
    Some(MatchRecord {
        preverb: Some(tok),
        noun: None,
        verb: parent,
        sentence: sent,
    })
}

fn adposition_separated_from_noun<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if sent.is_bounded(tok).ok()? || !lexicon.contains(&tok.lemma) {
        return None;
    }
    if !Conditions::new().is("upos", "ADP").matches(Some(tok)) {
        return None;
    }
    let parent = sent.parent(tok).ok()?;
    let grandparent = match parent {
        Some(p) => sent.parent(p).ok()?,
        None => None,
    };
    if !Conditions::new()
        .one_of("upos", ["NOUN", "PRON"])
        .one_of("deprel", ["obl", "obl:arg", "advmod"])
        .matches(parent)
    {
        return None;
    }
    if !Conditions::new().is("upos", "VERB").matches(grandparent) {
        return None;
    }

    let noun = parent?;
    let noun_id = noun.id.word()?;
    let tok_id = tok.id.word()?;
    if noun_id <= tok_id + 1 {
        return None;
    }
    // no other dependent of the noun may stand between the two
    let mut succ = sent.move_right(tok, Counting::Tokenized).ok()??;
    while succ.id != noun.id {
        if succ.head == Some(noun_id) {
            return None;
        }
        succ = sent.move_right(succ, Counting::Tokenized).ok()??;
    }

    Some(MatchRecord {
        preverb: Some(tok),
        noun: Some(noun),
        verb: grandparent,
        sentence: sent,
    })
}

fn adposition_noun_verb<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if sent.is_bounded(tok).ok()? || !lexicon.contains(&tok.lemma) {
        return None;
    }
    let right1 = sent.move_right(tok, Counting::Tokenized).ok()??;
    let right2 = sent.move_right(right1, Counting::Tokenized).ok()??;
    if !Conditions::new().is("upos", "VERB").matches(Some(right2)) {
        return None;
    }
    if !Conditions::new()
        .one_of("upos", ["NOUN", "PRON"])
        .matches(Some(right1))
    {
        return None;
    }
    Some(MatchRecord {
        preverb: Some(tok),
        noun: Some(right1),
        verb: Some(right2),
        sentence: sent,
    })
}

fn adposition_noun_verb_unattached<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    let record = adposition_noun_verb(tok, sent, lexicon)?;
    let noun = record.noun?;
    // the adposition must not hang off the noun it precedes
    if tok.head == noun.id.word() {
        return None;
    }
    Some(record)
}

fn adposition_noun_verb_object<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if sent.is_bounded(tok).ok()? || !lexicon.contains(&tok.lemma) {
        return None;
    }
    let right1 = sent.move_right(tok, Counting::Tokenized).ok()??;
    let right2 = sent.move_right(right1, Counting::Tokenized).ok()??;
    if !Conditions::new().is("upos", "VERB").matches(Some(right2)) {
        return None;
    }
    if !Conditions::new()
        .one_of("upos", ["NOUN", "PRON"])
        .one_of("deprel", ["obj", "obl"])
        .matches(Some(right1))
    {
        return None;
    }
    if right1.head != right2.id.word() {
        return None;
    }
    Some(MatchRecord {
        preverb: Some(tok),
        noun: Some(right1),
        verb: Some(right2),
        sentence: sent,
    })
}

fn stranded_particle<'a>(
    tok: &'a Token,
    sent: &'a Sentence,
    lexicon: &PreverbLexicon,
) -> Option<MatchRecord<'a>> {
    if sent.is_bounded(tok).ok()? || !lexicon.contains(&tok.lemma) {
        return None;
    }
    if !Conditions::new()
        .is("deprel", "compound:prt")
        .matches(Some(tok))
    {
        return None;
    }
    let parent = sent.parent(tok).ok()?;
    if !Conditions::new()
        .one_of("upos", ["NOUN", "PRON"])
        .one_of("deprel", ["conj", "advcl"])
        .matches(parent)
    {
        return None;
    }
    Some(MatchRecord {
        preverb: Some(tok),
        noun: parent,
        verb: None,
        sentence: sent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::scan_sentence;
    use crate::sentence::Token;

    fn lexicon() -> PreverbLexicon {
        PreverbLexicon::ancient_greek()
    }

    fn query(name: &str) -> PatternQuery {
        catalogue()
            .into_iter()
            .find(|q| q.name == name)
            .expect("unknown query name")
    }

    /// ADP(1, head 3)  NOUN(2, head 3)  VERB(3, root)
    fn adp_noun_verb_sentence() -> Sentence {
        Sentence::new(vec![
            Token::new(1, "ἀπὸ", "ἀπό", "ADP", 3, "case"),
            Token::new(2, "νηὸς", "νηῦς", "NOUN", 3, "obl"),
            Token::new(3, "ἔβη", "βαίνω", "VERB", 0, "root"),
        ])
    }

    #[test]
    fn test_contiguous_pattern_binds_all_roles() {
        let sent = adp_noun_verb_sentence();
        let records = scan_sentence(&query("adp_noun_verb"), &sent, &lexicon());

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.preverb.unwrap().form, "ἀπὸ");
        assert_eq!(record.noun.unwrap().form, "νηὸς");
        assert_eq!(record.verb.unwrap().form, "ἔβη");
    }

    #[test]
    fn test_contiguous_pattern_rejects_adjective_middle() {
        let mut sent = adp_noun_verb_sentence();
        sent.tokens[1].upos = "ADJ".to_string();
        let records = scan_sentence(&query("adp_noun_verb"), &sent, &lexicon());
        assert!(records.is_empty());
    }

    #[test]
    fn test_contiguous_pattern_rejects_foreign_lemma() {
        let mut sent = adp_noun_verb_sentence();
        sent.tokens[0].lemma = "λόγος".to_string();
        let records = scan_sentence(&query("adp_noun_verb"), &sent, &lexicon());
        assert!(records.is_empty());
    }

    #[test]
    fn test_unattached_variant_rejects_noun_headed_adposition() {
        let sent = adp_noun_verb_sentence();
        assert_eq!(
            scan_sentence(&query("adp_noun_verb_unattached"), &sent, &lexicon()).len(),
            1
        );

        let mut attached = adp_noun_verb_sentence();
        attached.tokens[0].head = Some(2);
        assert!(scan_sentence(&query("adp_noun_verb_unattached"), &attached, &lexicon()).is_empty());
    }

    #[test]
    fn test_object_variant_requires_verb_headed_object() {
        let sent = adp_noun_verb_sentence();
        assert_eq!(
            scan_sentence(&query("adp_noun_verb_object"), &sent, &lexicon()).len(),
            1
        );

        let mut detached = adp_noun_verb_sentence();
        detached.tokens[1].head = Some(1);
        assert!(scan_sentence(&query("adp_noun_verb_object"), &detached, &lexicon()).is_empty());

        let mut wrong_rel = adp_noun_verb_sentence();
        wrong_rel.tokens[1].deprel = "nsubj".to_string();
        assert!(scan_sentence(&query("adp_noun_verb_object"), &wrong_rel, &lexicon()).is_empty());
    }

    #[test]
    fn test_adverb_heads_verb() {
        let sent = Sentence::new(vec![
            Token::new(1, "πρὸς", "πρός", "ADV", 2, "advmod"),
            Token::new(2, "ἔειπε", "εἶπον", "VERB", 0, "root"),
        ]);
        let records = scan_sentence(&query("adverb_verb"), &sent, &lexicon());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].verb.unwrap().form, "ἔειπε");
        assert_eq!(records[0].noun, None);

        // same shape but the parent is not a verb
        let sent = Sentence::new(vec![
            Token::new(1, "πρὸς", "πρός", "ADV", 2, "advmod"),
            Token::new(2, "δῶμα", "δῶμα", "NOUN", 0, "root"),
        ]);
        assert!(scan_sentence(&query("adverb_verb"), &sent, &lexicon()).is_empty());
    }

    #[test]
    fn test_separated_adposition_requires_gap() {
        // VERB(1) ADP(2, head 4) ADJ(3, head 1) NOUN(4, head 1, obl)
        let sent = Sentence::new(vec![
            Token::new(1, "βῆ", "βαίνω", "VERB", 0, "root"),
            Token::new(2, "ἐπὶ", "ἐπί", "ADP", 4, "case"),
            Token::new(3, "θῖνα", "θίς", "ADJ", 1, "advmod"),
            Token::new(4, "θαλάσσης", "θάλασσα", "NOUN", 1, "obl"),
        ]);
        let records = scan_sentence(&query("adposition_distant_noun"), &sent, &lexicon());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].preverb.unwrap().form, "ἐπὶ");
        assert_eq!(records[0].noun.unwrap().form, "θαλάσσης");
        assert_eq!(records[0].verb.unwrap().form, "βῆ");
    }

    #[test]
    fn test_separated_adposition_rejects_adjacent_noun() {
        // ADP immediately before its noun: the gap condition fails
        let sent = Sentence::new(vec![
            Token::new(1, "βῆ", "βαίνω", "VERB", 0, "root"),
            Token::new(2, "ἐπὶ", "ἐπί", "ADP", 3, "case"),
            Token::new(3, "θαλάσσης", "θάλασσα", "NOUN", 1, "obl"),
        ]);
        assert!(scan_sentence(&query("adposition_distant_noun"), &sent, &lexicon()).is_empty());
    }

    #[test]
    fn test_separated_adposition_rejects_intervening_dependent() {
        // the token between ADP and noun depends on the noun
        let sent = Sentence::new(vec![
            Token::new(1, "βῆ", "βαίνω", "VERB", 0, "root"),
            Token::new(2, "ἐπὶ", "ἐπί", "ADP", 4, "case"),
            Token::new(3, "πολιῆς", "πολιός", "ADJ", 4, "amod"),
            Token::new(4, "θαλάσσης", "θάλασσα", "NOUN", 1, "obl"),
        ]);
        assert!(scan_sentence(&query("adposition_distant_noun"), &sent, &lexicon()).is_empty());
    }

    #[test]
    fn test_stranded_particle_on_nominal() {
        let sent = Sentence::new(vec![
            Token::new(1, "ἐν", "ἐν", "ADP", 2, "compound:prt"),
            Token::new(2, "νόστον", "νόστος", "NOUN", 0, "conj"),
        ]);
        let records = scan_sentence(&query("stranded_particle"), &sent, &lexicon());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].noun.unwrap().form, "νόστον");
        assert_eq!(records[0].verb, None);
    }

    #[test]
    fn test_bounded_candidate_never_matches() {
        let sent = Sentence::new(vec![
            Token::span(1, 2, "ἀπὸνηὸς"),
            Token::new(1, "ἀπὸ", "ἀπό", "ADP", 3, "case"),
            Token::new(2, "νηὸς", "νηῦς", "NOUN", 3, "obl"),
            Token::new(3, "ἔβη", "βαίνω", "VERB", 0, "root"),
        ]);
        assert!(scan_sentence(&query("adp_noun_verb"), &sent, &lexicon()).is_empty());
    }
}
