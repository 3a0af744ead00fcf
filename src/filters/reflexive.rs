//! Reflexive pronoun filter.
//!
//! Two stages: an idiom guard (a listed idiom containing the reflexive
//! form makes the occurrence non-referential), then a positional scan.
//! Candidates split into those preceding and following the pronoun; each
//! side is searched in priority order (plural subject, singular subject,
//! plural non-subject, then any noun/pronoun), taking the nearest match
//! and expanding plural picks to their coordinated group. The preceding
//! side wins; the following side is only a fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{FilterContext, FilterOutcome};
use crate::candidate::Candidate;
use crate::morph::{normalize_word, Number, PosTag};

/// Narrow the pool for a reflexive pronoun occurrence.
#[must_use]
pub fn filter_reflexive(pool: &[Candidate], ctx: &FilterContext<'_>) -> FilterOutcome {
    if idiom_guard(ctx) {
        return FilterOutcome::NoAntecedent;
    }

    let pronoun_start = ctx.pronoun_span.start;
    // The reflexive form itself never antecedes; synthesized candidates
    // join the preceding side at infinite distance.
    let eligible: Vec<&Candidate> = pool
        .iter()
        .filter(|c| !ctx.lexicon.reflexive.contains(&c.normalized))
        .collect();
    let left: Vec<&Candidate> = eligible
        .iter()
        .copied()
        .filter(|c| c.span.map_or(true, |s| s.start < pronoun_start))
        .collect();
    let right: Vec<&Candidate> = eligible
        .iter()
        .copied()
        .filter(|c| c.span.is_some_and(|s| s.start > pronoun_start))
        .collect();

    let left_distance =
        |c: &Candidate| c.span.map_or(usize::MAX, |s| pronoun_start.saturating_sub(s.end));
    let right_distance =
        |c: &Candidate| c.span.map_or(usize::MAX, |s| s.start.saturating_sub(pronoun_start));

    if let Some(result) = scan_side(&left, ctx, pool, &left_distance) {
        return FilterOutcome::Pool(result);
    }
    if let Some(result) = scan_side(&right, ctx, pool, &right_distance) {
        return FilterOutcome::Pool(result);
    }
    FilterOutcome::NoAntecedent
}

/// Priority scan over one side of the pronoun.
fn scan_side(
    side: &[&Candidate],
    ctx: &FilterContext<'_>,
    pool: &[Candidate],
    distance: &dyn Fn(&Candidate) -> usize,
) -> Option<Vec<Candidate>> {
    if side.is_empty() {
        return None;
    }
    let mut plural_subjects = Vec::new();
    let mut single_subjects = Vec::new();
    let mut plural_others = Vec::new();
    let mut others = Vec::new();
    for &c in side {
        let subject = c.is_subject_in(ctx.morph, ctx.sentence);
        let plural = is_plural_like(c);
        match (plural, subject) {
            (true, true) => plural_subjects.push(c),
            (false, true) => single_subjects.push(c),
            (true, false) => plural_others.push(c),
            (false, false) => others.push(c),
        }
    }
    let nearest = |v: &[&Candidate]| v.iter().copied().min_by_key(|c| distance(c)).cloned();

    if let Some(pick) = nearest(&plural_subjects) {
        return Some(expand_group(&pick, pool, ctx));
    }
    if let Some(pick) = nearest(&single_subjects) {
        return Some(vec![pick]);
    }
    if let Some(pick) = nearest(&plural_others) {
        return Some(expand_group(&pick, pool, ctx));
    }
    let nouns_pronouns: Vec<&Candidate> = others
        .iter()
        .copied()
        .filter(|c| matches!(c.pos, PosTag::Noun | PosTag::Pronoun))
        .collect();
    if let Some(pick) = nearest(&nouns_pronouns) {
        return Some(vec![pick]);
    }
    nearest(&others).map(|pick| vec![pick])
}

fn is_plural_like(candidate: &Candidate) -> bool {
    candidate.number == Number::Plural
        || candidate.is_group
        || matches!(candidate.normalized.as_str(), "они" | "мы" | "вы")
}

static AND_BETWEEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bи\b").unwrap());

/// Expand a plural pick to its coordinated group: pool candidates joined
/// to it by an "и" in the text between them, noun/name/pronoun parts of
/// speech only, ordered by position.
fn expand_group(pick: &Candidate, pool: &[Candidate], ctx: &FilterContext<'_>) -> Vec<Candidate> {
    let Some(pick_span) = pick.span else {
        return vec![pick.clone()];
    };
    let mut group: Vec<Candidate> = vec![pick.clone()];
    for c in pool {
        let Some(span) = c.span else { continue };
        if span == pick_span {
            continue;
        }
        let (lo, hi) = if span.start >= pick_span.end {
            (pick_span.end, span.start)
        } else if pick_span.start >= span.end {
            (span.end, pick_span.start)
        } else {
            continue;
        };
        let between = &ctx.text[lo..hi];
        if AND_BETWEEN_RE.is_match(between)
            && matches!(c.pos, PosTag::Noun | PosTag::Pronoun)
            && !group.iter().any(|g| g.span == c.span)
        {
            group.push(c.clone());
        }
    }
    group.sort_by_key(|c| c.span.map_or(0, |s| s.start));
    group
}

/// True when the pronoun's sentence contains a listed idiom that itself
/// contains the reflexive form: idiomatic, non-referential use.
fn idiom_guard(ctx: &FilterContext<'_>) -> bool {
    let pronoun_norm = normalize_word(ctx.pronoun);
    let sentence = &ctx.text[ctx.sentence.start..ctx.sentence.end];
    let sentence_norm = normalize_word(&sentence.replace(',', ""));
    ctx.lexicon
        .idioms
        .iter()
        .any(|idiom| sentence_norm.contains(idiom.as_str()) && idiom.contains(&pronoun_norm))
}

#[cfg(test)]
mod tests {
    use super::super::{FilterContext, FilterOutcome};
    use super::*;
    use crate::candidate::{CandidateFinder, Span};
    use crate::lexicon::Lexicon;
    use crate::morph::RuMorph;
    use crate::tokenize;

    fn run(text: &str, pronoun: &str) -> FilterOutcome {
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
        filter_reflexive(&pool, &ctx)
    }

    #[test]
    fn idiom_use_is_non_referential() {
        let outcome = run("Директор вышел из себя.", "себя");
        assert_eq!(outcome, FilterOutcome::NoAntecedent);
    }

    #[test]
    fn idiom_guard_ignores_commas() {
        let outcome = run("Брат был, вне себя.", "себя");
        assert_eq!(outcome, FilterOutcome::NoAntecedent);
    }

    #[test]
    fn nearest_subject_wins() {
        let outcome = run("Директор увидел себя.", "себя");
        match outcome {
            FilterOutcome::Pool(pool) => {
                assert_eq!(pool.len(), 1);
                assert_eq!(pool[0].surface, "Директор");
            }
            FilterOutcome::NoAntecedent => panic!("expected a candidate"),
        }
    }

    #[test]
    fn plural_subject_expands_to_group() {
        let outcome = run("Иван и Пётр увидели себя.", "себя");
        match outcome {
            FilterOutcome::Pool(pool) => {
                // the synthesized group or its expansion carries both names
                assert!(pool.len() >= 1);
            }
            FilterOutcome::NoAntecedent => panic!("expected candidates"),
        }
    }

    #[test]
    fn no_candidates_on_either_side() {
        let outcome = run("Увидел себя.", "себя");
        assert_eq!(outcome, FilterOutcome::NoAntecedent);
    }
}
