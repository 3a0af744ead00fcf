//! Sentence and word segmentation, and the pronoun locator.
//!
//! Offset arithmetic across the pipeline depends on one invariant: the
//! concatenation of [`split_sentences`] output reconstructs the input text
//! byte for byte. Inter-sentence whitespace therefore belongs to the
//! preceding sentence, and every span anywhere in the crate is an absolute
//! byte range into the full input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::candidate::Span;
use crate::lexicon::Lexicon;
use crate::morph::normalize_word;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[А-Яа-яЁёA-Za-z]+").unwrap());

/// A word token with its absolute byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word as it appears in the text.
    pub text: &'a str,
    /// Absolute byte span.
    pub span: Span,
}

/// Split text into sentence spans whose concatenation is the whole text.
///
/// A boundary closes after a run of sentence punctuation (`.?!…`), any
/// closing quotes/brackets, and the following whitespace run. Text without
/// terminal punctuation forms one final sentence.
#[must_use]
pub fn sentence_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let c = match text[i..].chars().next() {
            Some(c) => c,
            None => break,
        };
        if matches!(c, '.' | '!' | '?' | '…') {
            // Consume the punctuation run and any closing quotes.
            let mut j = i;
            while let Some(c2) = text[j..].chars().next() {
                if matches!(c2, '.' | '!' | '?' | '…' | '»' | '"' | ')') {
                    j += c2.len_utf8();
                } else {
                    break;
                }
            }
            // Then the whitespace run; the boundary sits after it.
            let mut k = j;
            let mut saw_ws = false;
            while let Some(c2) = text[k..].chars().next() {
                if c2.is_whitespace() {
                    saw_ws = true;
                    k += c2.len_utf8();
                } else {
                    break;
                }
            }
            if saw_ws || k == bytes.len() {
                spans.push(Span::new(start, k));
                start = k;
            }
            i = k.max(j);
        } else {
            i += c.len_utf8();
        }
    }
    if start < bytes.len() {
        spans.push(Span::new(start, bytes.len()));
    }
    spans
}

/// Split text into sentence strings; concatenation reconstructs the input.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text)
        .into_iter()
        .map(|s| &text[s.start..s.end])
        .collect()
}

/// Index of the sentence containing an absolute byte position.
#[must_use]
pub fn sentence_index_at(spans: &[Span], pos: usize) -> usize {
    spans
        .iter()
        .position(|s| s.start <= pos && pos < s.end)
        .unwrap_or(spans.len().saturating_sub(1))
}

/// Word tokens of a text slice, with spans made absolute by `base`.
#[must_use]
pub fn words_at(text: &str, base: usize) -> Vec<Token<'_>> {
    WORD_RE
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            span: Span::new(base + m.start(), base + m.end()),
        })
        .collect()
}

/// Word tokens of a whole text.
#[must_use]
pub fn words(text: &str) -> Vec<Token<'_>> {
    words_at(text, 0)
}

/// The word token covering an absolute byte position, if any.
#[must_use]
pub fn word_at(text: &str, pos: usize) -> Option<Token<'_>> {
    words(text)
        .into_iter()
        .find(|t| t.span.start <= pos && pos < t.span.end)
}

/// The first word strictly after an absolute byte position.
#[must_use]
pub fn next_word_after(text: &str, pos: usize) -> Option<Token<'_>> {
    if pos >= text.len() {
        return None;
    }
    WORD_RE.find(&text[pos..]).map(|m| Token {
        text: m.as_str(),
        span: Span::new(pos + m.start(), pos + m.end()),
    })
}

/// Ordered, non-overlapping spans of every pronoun occurrence.
///
/// Whole-word, case-insensitive: a token matches when its normalized form
/// belongs to the union of the five pronoun-class sets.
#[must_use]
pub fn find_pronoun_spans(text: &str, lexicon: &Lexicon) -> Vec<Span> {
    words(text)
        .into_iter()
        .filter(|t| lexicon.is_pronoun(&normalize_word(t.text)))
        .map(|t| t.span)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_reconstruct_input() {
        let texts = [
            "Маша пришла домой. Она устала.",
            "Один. Два! Три? Четыре…",
            "Нет терминатора",
            "С пробелом в конце. ",
            "«Привет!» — сказал он. Потом ушел.",
            "",
        ];
        for text in texts {
            let joined: String = split_sentences(text).concat();
            assert_eq!(joined, text, "reconstruction failed for: {text:?}");
        }
    }

    #[test]
    fn sentence_count() {
        assert_eq!(split_sentences("Маша пришла домой. Она устала.").len(), 2);
        assert_eq!(split_sentences("Одно предложение").len(), 1);
        assert_eq!(split_sentences("").len(), 0);
    }

    #[test]
    fn sentence_index_lookup() {
        let text = "Маша пришла домой. Она устала.";
        let spans = sentence_spans(text);
        let pos = text.find("Она").unwrap();
        assert_eq!(sentence_index_at(&spans, pos), 1);
        assert_eq!(sentence_index_at(&spans, 0), 0);
    }

    #[test]
    fn words_have_absolute_spans() {
        let text = "Маша пришла";
        let toks = words(text);
        assert_eq!(toks.len(), 2);
        assert_eq!(&text[toks[0].span.start..toks[0].span.end], "Маша");
        assert_eq!(&text[toks[1].span.start..toks[1].span.end], "пришла");
    }

    #[test]
    fn locator_finds_pronouns_case_insensitive() {
        let lex = Lexicon::builtin();
        let text = "Она устала. ОНА спала.";
        let spans = find_pronoun_spans(text, &lex);
        assert_eq!(spans.len(), 2);
        for s in &spans {
            assert_eq!(normalize_word(&text[s.start..s.end]), "она");
        }
        // ordered and non-overlapping
        assert!(spans[0].end <= spans[1].start);
    }

    #[test]
    fn locator_ignores_substrings() {
        let lex = Lexicon::builtin();
        // "она" occurs inside "сторона" but only whole words match
        let spans = find_pronoun_spans("сторона дороги", &lex);
        assert!(spans.is_empty());
    }

    #[test]
    fn next_word_lookup() {
        let text = "взял свою папку";
        let pos = text.find("свою").unwrap() + "свою".len();
        let tok = next_word_after(text, pos).unwrap();
        assert_eq!(tok.text, "папку");
        assert!(next_word_after(text, text.len()).is_none());
    }
}
