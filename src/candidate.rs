//! Antecedent candidates and the bounded-window candidate finder.
//!
//! For each pronoun occurrence the finder builds a fresh pool of possible
//! antecedents from a bounded preceding context: up to three sentences
//! before the pronoun's sentence plus the part of the current sentence
//! strictly before the pronoun (text after the pronoun is never visible).
//! Candidates never persist across occurrences.
//!
//! On top of the per-token pool, three heuristic scanners synthesize
//! candidates that have no single contiguous source span: coordination
//! groups ("Иван и Пётр"), comma-delimited vocatives, and speaker
//! attributions around quoted or dash-dialogue speech. These are the most
//! ambiguous part of the design and live here as isolated, independently
//! tested functions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::morph::{normalize_word, Gender, MorphAnalyzer, Number, Person, PosTag};
use crate::tokenize::{self, Token};

/// An absolute byte range into the full input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this span contains an absolute position.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Whether two spans overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }
}

/// A possible antecedent for one pronoun occurrence.
///
/// `span` is `None` for synthesized candidates (coordination groups,
/// vocative phrases, speaker names); such candidates carry no byte-exact
/// location and never win span-based proximity scoring, since the ranker
/// treats them as infinitely distant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The exact text span or synthesized phrase.
    pub surface: String,
    /// Absolute byte span into the full text, `None` when synthesized.
    pub span: Option<Span>,
    /// Coarse part of speech, `Noun` for synthesized phrases.
    pub pos: PosTag,
    /// Normalized form (lowercase, ё→е); used for frequency counting.
    pub normalized: String,
    /// Grammatical gender.
    pub gender: Gender,
    /// Grammatical number.
    pub number: Number,
    /// True for coordinated sets of entities; always treated as plural.
    pub is_group: bool,
}

impl Candidate {
    fn from_token(token: &Token<'_>, pos: PosTag, gender: Gender, number: Number) -> Self {
        Self {
            surface: token.text.to_string(),
            span: Some(token.span),
            pos,
            normalized: normalize_word(token.text),
            gender,
            number,
            is_group: false,
        }
    }

    fn synthesized(surface: String, gender: Gender, number: Number, is_group: bool) -> Self {
        Self {
            normalized: normalize_word(&surface),
            surface,
            span: None,
            pos: PosTag::Noun,
            gender,
            number,
            is_group,
        }
    }

    /// Subject-position heuristic: nominative case and located in the first
    /// third of `range`. Synthesized candidates have no location and are
    /// never in subject position.
    pub fn is_subject_in(&self, morph: &dyn MorphAnalyzer, range: Span) -> bool {
        let Some(span) = self.span else {
            return false;
        };
        if !range.contains(span.start) {
            return false;
        }
        let analysis = morph.analyze(&self.surface);
        if !matches!(analysis.pos, PosTag::Noun | PosTag::Pronoun) {
            return false;
        }
        if !analysis.is_nominative() {
            return false;
        }
        (span.start - range.start) * 3 < range.len()
    }
}

/// Builds the candidate pool for a pronoun occurrence.
pub struct CandidateFinder<'a> {
    lexicon: &'a Lexicon,
    morph: &'a dyn MorphAnalyzer,
    window_sentences: usize,
}

/// Formal second-person forms that spawn singular and plural readings.
fn is_formal_you(normalized: &str) -> bool {
    matches!(normalized, "вы" | "вас" | "вам" | "вами")
}

impl<'a> CandidateFinder<'a> {
    /// Create a finder over a lexicon and morphology adapter.
    #[must_use]
    pub fn new(lexicon: &'a Lexicon, morph: &'a dyn MorphAnalyzer, window_sentences: usize) -> Self {
        Self {
            lexicon,
            morph,
            window_sentences,
        }
    }

    /// Build the candidate pool for the pronoun at `pronoun_pos`.
    ///
    /// Candidates come back in discovery order: window tokens first, then
    /// coordination groups, then the vocative, then speaker attributions.
    /// No deduplication happens here; downstream filters and the ranker
    /// handle duplicates through lemma frequency.
    #[must_use]
    pub fn find(&self, text: &str, pronoun_pos: usize) -> Vec<Candidate> {
        let sentences = tokenize::sentence_spans(text);
        if sentences.is_empty() {
            return Vec::new();
        }
        let cur_idx = tokenize::sentence_index_at(&sentences, pronoun_pos);
        let win_idx = cur_idx.saturating_sub(self.window_sentences);
        let window_start = sentences[win_idx].start;
        let window_end = pronoun_pos.min(text.len()).max(window_start);

        let mut candidates = Vec::new();

        // Steps 3-4: window tokens with lexical expansion.
        for token in tokenize::words_at(&text[window_start..window_end], window_start) {
            let analysis = self.morph.analyze(token.text);
            let normalized = normalize_word(token.text);
            if analysis.pos != PosTag::Noun && !self.lexicon.is_pronoun(&normalized) {
                continue;
            }
            if is_formal_you(&normalized) {
                // Polite singular and true plural readings.
                candidates.push(Candidate::from_token(
                    &token,
                    analysis.pos,
                    Gender::Unspecified,
                    Number::Singular,
                ));
                candidates.push(Candidate::from_token(
                    &token,
                    analysis.pos,
                    Gender::Unspecified,
                    Number::Plural,
                ));
            } else if self.lexicon.common_gender.contains(&normalized) {
                candidates.push(Candidate::from_token(
                    &token,
                    analysis.pos,
                    Gender::Masc,
                    analysis.number,
                ));
                candidates.push(Candidate::from_token(
                    &token,
                    analysis.pos,
                    Gender::Femn,
                    analysis.number,
                ));
            } else if self.lexicon.collective.contains(&normalized) {
                candidates.push(Candidate::from_token(
                    &token,
                    analysis.pos,
                    analysis.gender,
                    Number::Singular,
                ));
                candidates.push(Candidate::from_token(
                    &token,
                    analysis.pos,
                    analysis.gender,
                    Number::Plural,
                ));
            } else {
                candidates.push(Candidate::from_token(
                    &token,
                    analysis.pos,
                    analysis.gender,
                    analysis.number,
                ));
            }
        }

        // Step 5: coordination groups over the whole window sentences
        // (original case, current sentence included past the pronoun).
        let group_region = &text[window_start..sentences[cur_idx].end];
        for names in find_coord_groups(group_region, self.morph) {
            if names.len() > 1 {
                let surface = names.join(" и ");
                candidates.push(Candidate::synthesized(
                    surface,
                    Gender::Unspecified,
                    Number::Plural,
                    true,
                ));
            }
        }

        let pronoun_word = tokenize::word_at(text, pronoun_pos);

        // Step 6: vocative addressee in the preceding or current sentence.
        if let Some(ref pw) = pronoun_word {
            for idx in win_idx.max(cur_idx.saturating_sub(1))..=cur_idx {
                let sentence = &text[sentences[idx].start..sentences[idx].end];
                if let Some(addressed) = find_addressed_entity(pw.text, sentence, self.morph) {
                    let (gender, number) = vocative_tags(&addressed, self.morph);
                    candidates.push(Candidate::synthesized(addressed, gender, number, false));
                    break;
                }
            }
        }

        // Step 7: speaker attribution around quoted or dash-dialogue speech.
        if let Some(ref pw) = pronoun_word {
            let third_person = self.morph.analyze(pw.text).person == Person::Third;
            let speakers = speaker_context(text, pronoun_pos, self.morph, third_person);
            for speaker in speakers {
                let (gender, number) = speaker_tags(&speaker, self.morph);
                candidates.push(Candidate::synthesized(speaker, gender, number, false));
            }
        }

        candidates
    }
}

/// Gender/number of a vocative phrase: taken from its first noun
/// constituent, defaulting to unspecified gender and plural number.
fn vocative_tags(phrase: &str, morph: &dyn MorphAnalyzer) -> (Gender, Number) {
    for word in phrase.split_whitespace() {
        let analysis = morph.analyze(word);
        if analysis.pos == PosTag::Noun {
            return (analysis.gender, analysis.number);
        }
    }
    (Gender::Unspecified, Number::Plural)
}

/// Gender/number of a speaker phrase; multi-word names stay unspecified.
fn speaker_tags(speaker: &str, morph: &dyn MorphAnalyzer) -> (Gender, Number) {
    let mut words = speaker.split_whitespace();
    match (words.next(), words.next()) {
        (Some(single), None) => {
            let analysis = morph.analyze(single);
            (analysis.gender, analysis.number)
        }
        _ => (Gender::Unspecified, Number::Unspecified),
    }
}

// =============================================================================
// Coordination groups
// =============================================================================

static COORD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "и X, и Y" repetition
        r"(?:и\s+[А-ЯЁа-яё]+\s*,\s*)+(?:и\s+[А-ЯЁа-яё]+)",
        // "X, Y и Z" list with conjunction
        r"(?:[А-ЯЁа-яё]+,\s*)+[А-ЯЁа-яё]+\s+и\s+[А-ЯЁа-яё]+",
        // "X и Y" pair
        r"[А-ЯЁа-яё]+\s+и\s+[А-ЯЁа-яё]+",
        // plain comma list
        r"(?:[А-ЯЁа-яё]+,\s+)+[А-ЯЁа-яё]+",
        // comitative "X с Y"
        r"[А-ЯЁа-яё]+\s+с\s+[А-ЯЁа-яё]+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Scan a region for coordinated noun sequences.
///
/// Patterns are tried in specificity order and a match is dropped when it
/// overlaps a span an earlier pattern already claimed. For each surviving
/// match, only noun tokens are kept, normalized, and capitalized to match
/// the first token of the match; fewer than two surviving nouns is not a
/// group.
pub(crate) fn find_coord_groups(region: &str, morph: &dyn MorphAnalyzer) -> Vec<Vec<String>> {
    let mut groups = Vec::new();
    let mut claimed: Vec<Span> = Vec::new();
    for pattern in COORD_PATTERNS.iter() {
        for m in pattern.find_iter(region) {
            let span = Span::new(m.start(), m.end());
            if claimed.iter().any(|c| c.overlaps(&span)) {
                continue;
            }
            let tokens = tokenize::words(m.as_str());
            let capitalize = tokens
                .first()
                .and_then(|t| t.text.chars().next())
                .is_some_and(char::is_uppercase);
            let mut names = Vec::new();
            for token in &tokens {
                let analysis = morph.analyze(token.text);
                if analysis.pos == PosTag::Noun {
                    names.push(if capitalize {
                        capitalize_first(&analysis.normal)
                    } else {
                        analysis.normal.clone()
                    });
                }
            }
            if names.len() > 1 {
                groups.push(names);
                claimed.push(span);
            }
        }
    }
    groups
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Vocative addressee
// =============================================================================

static VOCATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([А-ЯЁа-яё]+(?:\s+[А-ЯЁа-яё]+)*)\s*,").unwrap());

/// Find a comma-delimited vocative phrase following `pronoun_word` inside a
/// sentence: `, <phrase>,` containing at least one noun.
pub(crate) fn find_addressed_entity(
    pronoun_word: &str,
    sentence: &str,
    morph: &dyn MorphAnalyzer,
) -> Option<String> {
    let needle = normalize_word(pronoun_word);
    let start = tokenize::words(sentence)
        .into_iter()
        .find(|t| normalize_word(t.text) == needle)
        .map(|t| t.span.end)?;
    for m in VOCATIVE_RE.captures_iter(&sentence[start..]) {
        let phrase = m.get(1).map(|g| g.as_str().trim())?;
        let has_noun = phrase
            .split_whitespace()
            .any(|w| morph.analyze(w).pos == PosTag::Noun);
        if has_noun {
            return Some(phrase.to_string());
        }
    }
    None
}

// =============================================================================
// Speaker attribution
// =============================================================================

static QUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"«[^«»]*?»|"[^"]*?""#).unwrap());
static BEFORE_AUTHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([А-ЯЁа-яё]+\s+[А-ЯЁа-яё]+|[А-ЯЁа-яё]+)\s*[:,\-—–]\s*$").unwrap());
static NAME_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[А-ЯЁа-яё]+").unwrap());

/// Identify speaker candidates for a pronoun inside direct speech.
///
/// Quoted speech: look for an attribution clause immediately before the
/// quotation (`Имя:` / `Имя, —`) or after it (`, — сказал Имя`). Dash
/// dialogue: scan upward from the pronoun's line for the nearest
/// non-dialogue line and use the text after its first comma (or the whole
/// line). Third-person pronouns collect attributions on both sides of the
/// quotation; other pronouns stop at the first.
pub(crate) fn speaker_context(
    text: &str,
    pronoun_pos: usize,
    morph: &dyn MorphAnalyzer,
    collect_all: bool,
) -> Vec<String> {
    let mut speakers = Vec::new();
    for m in QUOTE_RE.find_iter(text) {
        if !(m.start() <= pronoun_pos && pronoun_pos < m.end()) {
            continue;
        }
        if let Some(before) = attribution_before(text[..m.start()].trim_end(), morph) {
            speakers.push(before);
        }
        if speakers.is_empty() || collect_all {
            if let Some(after) = attribution_after(&text[m.end()..], morph) {
                if !speakers.contains(&after) {
                    speakers.push(after);
                }
            }
        }
        return speakers;
    }

    // Dash dialogue: the pronoun's line must open with a dash.
    let mut offset = 0;
    let mut lines: Vec<(usize, &str)> = Vec::new();
    let mut pronoun_line = None;
    for line in text.split('\n') {
        let end = offset + line.len();
        if offset <= pronoun_pos && pronoun_pos <= end {
            pronoun_line = Some(lines.len());
        }
        lines.push((offset, line));
        offset = end + 1;
    }
    let Some(idx) = pronoun_line else {
        return speakers;
    };
    if !is_dialogue_line(lines[idx].1) {
        return speakers;
    }
    for (_, line) in lines[..idx].iter().rev() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_dialogue_line(line) {
            continue;
        }
        let speaker = match trimmed.split_once(',') {
            Some((_, after)) => after.trim(),
            None => trimmed,
        };
        let speaker = speaker.trim_end_matches(|c: char| !c.is_alphabetic());
        if !speaker.is_empty() {
            speakers.push(speaker.to_string());
        }
        break;
    }
    speakers
}

fn is_dialogue_line(line: &str) -> bool {
    matches!(
        line.trim_start().chars().next(),
        Some('-') | Some('—') | Some('–')
    )
}

/// `Имя:` / `Имя, —` attribution ending right before a quotation.
fn attribution_before(before: &str, morph: &dyn MorphAnalyzer) -> Option<String> {
    let captures = BEFORE_AUTHOR_RE.captures(before)?;
    let candidate = captures.get(1)?.as_str().trim();
    let words: Vec<&str> = NAME_TOKEN_RE
        .find_iter(candidate)
        .map(|m| m.as_str())
        .collect();
    if !words.is_empty() {
        let last_two = &words[words.len().saturating_sub(2)..];
        let name_parts: Vec<&str> = last_two
            .iter()
            .copied()
            .filter(|w| morph.analyze(w).pos == PosTag::Noun)
            .collect();
        if !name_parts.is_empty() {
            return Some(name_parts.join(" "));
        }
    }
    Some(candidate.to_string())
}

/// `, — сказал Имя` attribution right after a quotation: skip leading
/// punctuation and non-noun tokens, then take one noun plus an optional
/// second (Имя Отчество).
fn attribution_after(after: &str, morph: &dyn MorphAnalyzer) -> Option<String> {
    static LEAD_TRIM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s,.\-–—]+").unwrap());
    let tail = LEAD_TRIM.replace(after, "");
    let tokens: Vec<&str> = NAME_TOKEN_RE.find_iter(&tail).map(|m| m.as_str()).collect();
    let first_noun = tokens
        .iter()
        .position(|w| morph.analyze(w).pos == PosTag::Noun)?;
    let mut name_parts = vec![tokens[first_noun]];
    if let Some(next) = tokens.get(first_noun + 1) {
        if morph.analyze(next).pos == PosTag::Noun {
            name_parts.push(next);
        }
    }
    Some(name_parts.join(" "))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::RuMorph;

    fn finder_fixtures() -> (Lexicon, RuMorph) {
        (Lexicon::builtin(), RuMorph::new())
    }

    fn find(text: &str, pronoun: &str) -> Vec<Candidate> {
        let (lex, morph) = finder_fixtures();
        let pos = text.find(pronoun).expect("pronoun not in text");
        CandidateFinder::new(&lex, &morph, 3).find(text, pos)
    }

    #[test]
    fn window_excludes_text_after_pronoun() {
        let cands = find("Маша пришла домой. Она увидела стол.", "Она");
        assert!(cands.iter().any(|c| c.surface == "Маша"));
        assert!(!cands.iter().any(|c| c.surface == "стол"));
    }

    #[test]
    fn window_is_bounded() {
        let text = "Окно открыто. Раз. Два. Три. Четыре. Оно скрипит.";
        let cands = find(text, "Оно");
        // "Окно" is five sentences back, outside the 3-sentence window.
        assert!(!cands.iter().any(|c| c.surface == "Окно"));
    }

    #[test]
    fn candidate_spans_are_absolute() {
        let text = "Маша пришла домой. Она устала.";
        let cands = find(text, "Она");
        let masha = cands.iter().find(|c| c.surface == "Маша").unwrap();
        let span = masha.span.unwrap();
        assert_eq!(&text[span.start..span.end], "Маша");
    }

    #[test]
    fn formal_you_spawns_two_readings() {
        let cands = find("Я вас ждал. Они пришли.", "Они");
        let vy: Vec<_> = cands.iter().filter(|c| c.normalized == "вас").collect();
        assert_eq!(vy.len(), 2);
        assert!(vy.iter().any(|c| c.number == Number::Singular));
        assert!(vy.iter().any(|c| c.number == Number::Plural));
    }

    #[test]
    fn common_gender_spawns_both_genders() {
        let cands = find("Сирота плакала. Она ушла.", "Она");
        let orphan: Vec<_> = cands.iter().filter(|c| c.normalized == "сирота").collect();
        assert_eq!(orphan.len(), 2);
        assert!(orphan.iter().any(|c| c.gender == Gender::Masc));
        assert!(orphan.iter().any(|c| c.gender == Gender::Femn));
    }

    #[test]
    fn collective_spawns_both_numbers() {
        let cands = find("Команда выиграла. Они радовались.", "Они");
        let team: Vec<_> = cands.iter().filter(|c| c.normalized == "команда").collect();
        assert_eq!(team.len(), 2);
        assert!(team.iter().any(|c| c.number == Number::Singular));
        assert!(team.iter().any(|c| c.number == Number::Plural));
    }

    #[test]
    fn coord_group_synthesized_plural() {
        let cands = find("Иван и Пётр пришли. Они сели.", "Они");
        let group = cands.iter().find(|c| c.is_group).expect("no group found");
        assert_eq!(group.surface, "Иван и Петр");
        assert_eq!(group.number, Number::Plural);
        assert!(group.span.is_none());
    }

    #[test]
    fn coord_groups_isolated() {
        let morph = RuMorph::new();
        let groups = find_coord_groups("Анна, Борис и Вера пришли", &morph);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec!["Анна", "Борис", "Вера"]);
    }

    #[test]
    fn coord_group_skips_non_nouns() {
        let morph = RuMorph::new();
        // verbs joined by "и" never form a group
        let groups = find_coord_groups("пришла и устала", &morph);
        assert!(groups.is_empty());
    }

    #[test]
    fn vocative_detected() {
        let morph = RuMorph::new();
        let found = find_addressed_entity("вы", "Куда вы, мама, идете?", &morph);
        assert_eq!(found.as_deref(), Some("мама"));
    }

    #[test]
    fn vocative_requires_noun() {
        let morph = RuMorph::new();
        let found = find_addressed_entity("вы", "Куда вы, быстро, идете?", &morph);
        assert_eq!(found, None);
    }

    #[test]
    fn speaker_before_quote() {
        let morph = RuMorph::new();
        let text = "Мария: «Я устала»";
        let pos = text.find('Я').unwrap();
        let speakers = speaker_context(text, pos, &morph, false);
        assert_eq!(speakers, vec!["Мария".to_string()]);
    }

    #[test]
    fn speaker_after_quote() {
        let morph = RuMorph::new();
        let text = "«Я устала», — сказала Мария.";
        let pos = text.find('Я').unwrap();
        let speakers = speaker_context(text, pos, &morph, false);
        assert_eq!(speakers, vec!["Мария".to_string()]);
    }

    #[test]
    fn speaker_from_dialogue_line() {
        let morph = RuMorph::new();
        let text = "Вошла бабушка, Мария Ивановна.\n- Я устала.";
        let pos = text.rfind('Я').unwrap();
        let speakers = speaker_context(text, pos, &morph, false);
        assert_eq!(speakers, vec!["Мария Ивановна".to_string()]);
    }

    #[test]
    fn subject_position_heuristic() {
        let morph = RuMorph::new();
        let text = "Директор взял свою папку.";
        let cands = {
            let lex = Lexicon::builtin();
            let pos = text.find("свою").unwrap();
            CandidateFinder::new(&lex, &morph, 3).find(text, pos)
        };
        let range = Span::new(0, text.len());
        let director = cands.iter().find(|c| c.surface == "Директор").unwrap();
        assert!(director.is_subject_in(&morph, range));
    }
}
