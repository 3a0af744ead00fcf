//! Possessive pronoun filter.
//!
//! Works inside the minimal clause containing the pronoun: the sentence is
//! split on commas, semicolons, colons, dashes, and the coordinating
//! conjunctions и/а/но, and only the clause around the pronoun is
//! consulted for subject position. Dispatch is by lemma family: the
//! reflexive-possessive свой binds to the clause subject, третье-лицо
//! его/ее by gender and number, их by plurality, and first/second-person
//! possessives to a person-matching personal pronoun in the pool.

use once_cell::sync::Lazy;
use regex::Regex;

use super::FilterContext;
use crate::candidate::{Candidate, Span};
use crate::morph::{normalize_word, Number, Person, PosTag};

static CLAUSE_DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;:—–]|\sи\s|\sа\s|\sно\s").unwrap());

/// Split a sentence into clause spans (absolute, delimiters excluded).
pub(crate) fn clause_spans(text: &str, sentence: Span) -> Vec<Span> {
    let slice = &text[sentence.start..sentence.end];
    let mut spans = Vec::new();
    let mut start = 0;
    for m in CLAUSE_DELIMITER_RE.find_iter(slice) {
        if m.start() > start {
            spans.push(Span::new(sentence.start + start, sentence.start + m.start()));
        }
        start = m.end();
    }
    if start < slice.len() {
        spans.push(Span::new(sentence.start + start, sentence.start + slice.len()));
    }
    spans
}

/// The minimal clause containing an absolute position; the whole sentence
/// when splitting yields nothing around it.
pub(crate) fn clause_containing(text: &str, sentence: Span, pos: usize) -> Span {
    clause_spans(text, sentence)
        .into_iter()
        .find(|c| c.contains(pos))
        .unwrap_or(sentence)
}

const SVOY_FAMILY: &[&str] = &[
    "свой", "своего", "своему", "своим", "своем", "своя", "свою", "своей", "свое", "свои",
    "своих", "своими",
];

const FIRST_PERSON_POSSESSIVES: &[&str] = &[
    "мой", "моего", "моему", "моим", "моем", "моя", "мою", "моей", "мое", "мои", "моих", "моими",
];

const SECOND_PERSON_POSSESSIVES: &[&str] = &[
    "твой", "твоего", "твоему", "твоим", "твоем", "твоя", "твою", "твоей", "твое", "твои",
    "твоих", "твоими", "ваш", "вашего", "вашему", "вашим", "вашем", "ваша", "вашу", "вашей",
    "ваше", "ваши", "ваших", "вашими",
];

/// Personal-pronoun forms a first/second-person possessive can bind to.
const SPEECH_ACT_PRONOUNS: &[&str] = &[
    "я", "мы", "ты", "вы", "меня", "нас", "тебя", "вас", "мне", "нам", "тебе", "вам", "мой",
    "наш", "твой", "ваш", "свой",
];

/// Narrow the pool for a possessive pronoun occurrence.
#[must_use]
pub fn filter_possessive(pool: &[Candidate], ctx: &FilterContext<'_>) -> Vec<Candidate> {
    let norm = normalize_word(ctx.pronoun);
    let clause = clause_containing(ctx.text, ctx.sentence, ctx.pronoun_span.start);

    let filtered: Vec<Candidate> = if SVOY_FAMILY.contains(&norm.as_str()) {
        let subjects: Vec<Candidate> = pool
            .iter()
            .filter(|c| c.is_subject_in(ctx.morph, clause))
            .cloned()
            .collect();
        if !subjects.is_empty() {
            return subjects;
        }
        Vec::new()
    } else if matches!(norm.as_str(), "его" | "ее") {
        let pron = ctx.morph.analyze(ctx.pronoun);
        pool.iter()
            .filter(|c| c.gender.agrees(pron.gender) && c.number.agrees(pron.number))
            .cloned()
            .collect()
    } else if norm == "их" {
        pool.iter()
            .filter(|c| c.number == Number::Plural)
            .cloned()
            .collect()
    } else if FIRST_PERSON_POSSESSIVES.contains(&norm.as_str())
        || SECOND_PERSON_POSSESSIVES.contains(&norm.as_str())
    {
        let person = if FIRST_PERSON_POSSESSIVES.contains(&norm.as_str()) {
            Person::First
        } else {
            Person::Second
        };
        let matching: Vec<Candidate> = pool
            .iter()
            .filter(|c| {
                c.pos == PosTag::Pronoun
                    && SPEECH_ACT_PRONOUNS.contains(&c.normalized.as_str())
                    && ctx.morph.analyze(&c.surface).person == person
            })
            .cloned()
            .collect();
        if !matching.is_empty() {
            return matching;
        }
        // No person-matching pronoun around: keep the whole pool.
        return pool.to_vec();
    } else {
        Vec::new()
    };

    if filtered.is_empty() {
        // Generic fallback: any pronoun-tagged candidate from the pool.
        pool.iter()
            .filter(|c| c.pos == PosTag::Pronoun)
            .cloned()
            .collect()
    } else {
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::super::FilterContext;
    use super::*;
    use crate::candidate::CandidateFinder;
    use crate::lexicon::Lexicon;
    use crate::morph::{Gender, RuMorph};
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
        filter_possessive(&pool, &ctx)
    }

    #[test]
    fn clause_splitting() {
        let text = "Он пришел, она ушла";
        let spans = clause_spans(text, Span::new(0, text.len()));
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].start..spans[0].end], "Он пришел");
        assert_eq!(&text[spans[1].start..spans[1].end], " она ушла");
    }

    #[test]
    fn svoy_binds_to_clause_subject() {
        let survivors = run("Директор взял свою папку.", "свою");
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].surface, "Директор");
    }

    #[test]
    fn svoy_ignores_objects() {
        // "стол" is an object in an earlier clause, not the clause subject
        let survivors = run("Брат увидел стол, взял свою книгу.", "свою");
        assert!(!survivors.iter().any(|c| c.surface == "стол"));
    }

    #[test]
    fn ego_matches_gender_and_number() {
        let survivors = run("Маша и Иван пришли. Я взял его папку.", "его");
        assert!(survivors.iter().any(|c| c.surface == "Иван"));
        assert!(!survivors.iter().any(|c| c.surface == "Маша"));
    }

    #[test]
    fn ih_requires_plural() {
        let survivors = run("Иван и Пётр пришли. Я взял их папки.", "их");
        for c in &survivors {
            assert_eq!(c.number, Number::Plural, "{c:?}");
        }
        assert!(survivors.iter().any(|c| c.is_group));
    }

    #[test]
    fn first_person_possessive_binds_to_speaker_pronoun() {
        let survivors = run("Я пришел домой. Брат взял мою книгу.", "мою");
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].normalized, "я");
    }

    #[test]
    fn second_person_possessive_prefers_second_person() {
        let survivors = run("Я видел, как ты взял твою книгу.", "твою");
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].normalized, "ты");
    }

    #[test]
    fn possessive_without_speech_act_pronoun_keeps_pool() {
        let survivors = run("Маша пришла. Она взяла мою книгу.", "мою");
        // no first-person pronoun in the window: the pool passes through
        assert!(survivors.iter().any(|c| c.surface == "Маша"));
    }

    #[test]
    fn common_gender_candidate_survives_matching_reading() {
        let survivors = run("Сирота пришла. Я взял ее папку.", "ее");
        let readings: Vec<Gender> = survivors
            .iter()
            .filter(|c| c.normalized == "сирота")
            .map(|c| c.gender)
            .collect();
        assert_eq!(readings, vec![Gender::Femn]);
    }
}
