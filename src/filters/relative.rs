//! Relative pronoun filter.
//!
//! A relative clause points backwards across its comma: only candidates at
//! or before the last comma preceding the pronoun are eligible, scanned
//! from nearest to farthest. Dispatch is by lemma family. Animate кто and
//! inanimate что additionally require a verb right after the pronoun,
//! singular который/чей matches gender and number, and the plural family
//! ignores the comma restriction and returns every number-matching
//! candidate (groups included).

use super::FilterContext;
use crate::candidate::Candidate;
use crate::morph::{normalize_word, Animacy, Gender, PosTag};
use crate::tokenize;

const WHO_FAMILY: &[&str] = &["кто", "кого", "кому", "кем", "ком"];
const WHAT_FAMILY: &[&str] = &["что", "чего", "чем", "чему", "которое"];
const WHICH_SINGULAR: &[&str] = &[
    "который", "которая", "которого", "которую", "которым", "котором", "которой", "которому",
    "чей", "чья", "чьего", "чьей", "чьим", "чьему",
];
const WHICH_PLURAL: &[&str] = &[
    "которые", "чьи", "которых", "чьих", "которыми", "чьими", "которым", "чьим",
];

/// Narrow the pool for a relative pronoun occurrence.
#[must_use]
pub fn filter_relative(pool: &[Candidate], ctx: &FilterContext<'_>) -> Vec<Candidate> {
    let norm = normalize_word(ctx.pronoun);

    // Singular families are checked before the plural family: которым and
    // чьим belong to both and read as singular instrumental first.
    if WHO_FAMILY.contains(&norm.as_str()) {
        return verb_gated_scan(pool, ctx, Animacy::Animate);
    }
    if WHAT_FAMILY.contains(&norm.as_str()) {
        return verb_gated_scan(pool, ctx, Animacy::Inanimate);
    }
    if WHICH_SINGULAR.contains(&norm.as_str()) {
        let pron = ctx.morph.analyze(ctx.pronoun);
        for c in eligible_before_comma(pool, ctx) {
            if c.pos == PosTag::Noun
                && c.number == pron.number
                && (c.gender == pron.gender || c.gender == Gender::Unspecified)
            {
                return vec![c.clone()];
            }
        }
        return Vec::new();
    }
    if WHICH_PLURAL.contains(&norm.as_str()) {
        let pron = ctx.morph.analyze(ctx.pronoun);
        return pool
            .iter()
            .filter(|c| {
                if c.is_group {
                    c.number == pron.number
                } else {
                    c.gender == pron.gender && c.number == pron.number
                }
            })
            .cloned()
            .collect();
    }
    Vec::new()
}

/// Last comma in the sentence strictly before the pronoun.
fn last_comma_before(ctx: &FilterContext<'_>) -> Option<usize> {
    let upto = ctx.pronoun_span.start;
    ctx.text[ctx.sentence.start..upto.max(ctx.sentence.start)]
        .rfind(',')
        .map(|rel| ctx.sentence.start + rel)
}

/// Span-carrying candidates at or before the comma, nearest first.
fn eligible_before_comma<'p>(
    pool: &'p [Candidate],
    ctx: &FilterContext<'_>,
) -> impl Iterator<Item = &'p Candidate> {
    let comma = last_comma_before(ctx);
    let mut eligible: Vec<&Candidate> = pool
        .iter()
        .filter(move |c| match (c.span, comma) {
            (Some(span), Some(comma)) => span.start <= comma,
            _ => false,
        })
        .collect();
    eligible.sort_by_key(|c| std::cmp::Reverse(c.span.map_or(0, |s| s.start)));
    eligible.into_iter()
}

/// кто/что scan: the word right after the pronoun must be verb-like, and
/// the first eligible noun with the required animacy wins.
fn verb_gated_scan(
    pool: &[Candidate],
    ctx: &FilterContext<'_>,
    animacy: Animacy,
) -> Vec<Candidate> {
    let next_is_verb = tokenize::next_word_after(ctx.text, ctx.pronoun_span.end)
        .map(|t| ctx.morph.analyze(t.text).pos == PosTag::Verb)
        .unwrap_or(false);
    if !next_is_verb {
        return Vec::new();
    }
    for c in eligible_before_comma(pool, ctx) {
        if c.pos == PosTag::Noun && ctx.morph.analyze(&c.surface).animacy == animacy {
            return vec![c.clone()];
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::super::FilterContext;
    use super::*;
    use crate::candidate::{CandidateFinder, Span};
    use crate::lexicon::Lexicon;
    use crate::morph::{Number, RuMorph};
    use crate::tokenize;

    fn run(text: &str, pronoun: &str) -> Vec<Candidate> {
        let lex = Lexicon::builtin();
        let morph = RuMorph::new();
        let pos = text.find(pronoun).unwrap();
        let pool = CandidateFinder::new(&lex, &morph, 3).find(text, pos);
        let sentences = tokenize::sentence_spans(text);
        let sentence = sentences[tokenize::sentence_index_at(&sentences, pos)];
        let ctx = FilterContext {
            text,
            pronoun,
            pronoun_span: Span::new(pos, pos + pronoun.len()),
            sentence,
            is_sentence_initial: false,
            lexicon: &lex,
            morph: &morph,
        };
        filter_relative(&pool, &ctx)
    }

    #[test]
    fn singular_which_picks_nearest_match_before_comma() {
        let survivors = run("Я видел стол, который стоял в углу.", "который");
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].surface, "стол");
    }

    #[test]
    fn comma_restriction_blocks_later_candidates() {
        // no comma before the pronoun: nothing is eligible
        let survivors = run("Я видел стол который стоял.", "который");
        assert!(survivors.is_empty());
    }

    #[test]
    fn gender_must_match_or_be_unspecified() {
        let survivors = run("Я видел книгу, который стоял.", "который");
        // "книгу" is feminine; masculine "который" rejects it
        assert!(survivors.is_empty());
    }

    #[test]
    fn who_requires_following_verb_and_animacy() {
        let survivors = run("Вошел брат, кто спал.", "кто");
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].surface, "брат");

        let none = run("Вошел стол, кто спал.", "кто");
        assert!(none.is_empty());
    }

    #[test]
    fn who_without_verb_selects_nothing() {
        let survivors = run("Вошел брат, кто он.", "кто");
        assert!(survivors.is_empty());
    }

    #[test]
    fn plural_family_collects_all_matches() {
        let survivors = run("Иван и Пётр пришли, которые спали.", "которые");
        // plural candidates and groups all survive, not just the nearest
        assert!(survivors.iter().any(|c| c.is_group));
        for c in &survivors {
            assert_eq!(c.number, Number::Plural, "{c:?}");
        }
    }
}
