//! Report rendering
//!
//! Formats per-query match lists into the plain-text reports the
//! command-line driver writes out. The matching layer only produces
//! [`MatchRecord`]s; everything about their presentation lives here.

use crate::queries::{MatchRecord, QueryMatches};
use std::fmt::Write;

/// Render the full report for one query: description header followed
/// by one block per match.
pub fn render(matches: &QueryMatches) -> String {
    let mut out = String::new();
    out.push_str(matches.query.description);
    out.push('\n');
    for record in &matches.records {
        out.push('\n');
        render_record(&mut out, record);
    }
    out
}

fn render_record(out: &mut String, record: &MatchRecord) {
    let sent = record.sentence;
    let _ = writeln!(out, "sent_id: {}", sent.sent_id().unwrap_or("<no id>"));
    if let Some(reference) = record.preverb.and_then(|t| t.misc_value("Ref")) {
        let _ = writeln!(out, "ref: {}", reference);
    }
    if let Some(text) = &sent.text {
        let _ = writeln!(out, "Sentence: {}", text);
    }
    if let Some(preverb) = record.preverb {
        let _ = writeln!(out, "PREVERB → {}; deprel: {}", preverb.form, preverb.deprel);
    }
    if let Some(noun) = record.noun {
        let _ = writeln!(out, "NOUN/PRON → {}; deprel: {}", noun.form, noun.deprel);
    }
    if let Some(verb) = record.verb {
        let _ = writeln!(out, "VERB → {}; upos: {}", verb.form, verb.upos);
    }
}
