//! The resolution driver.
//!
//! Per pronoun occurrence the driver runs classify → gather → filter →
//! select, chases pronoun-valued results to a terminal referent through a
//! bounded iterative loop, and finally rewrites the text with bracketed
//! markers. Resolution of each occurrence is a pure function of the input
//! text and the pronoun position; only the final annotation pass mutates
//! the output buffer, strictly left to right.

use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, CandidateFinder, Span};
use crate::classify::{classify, PronounClass};
use crate::error::{Error, Result};
use crate::filters::{self, FilterContext, FilterOutcome};
use crate::lexicon::Lexicon;
use crate::morph::{MorphAnalyzer, PosTag, RuMorph};
use crate::rank::rank;
use crate::tokenize;

/// Literal rendering of the no-antecedent sentinel inside markers.
pub const NO_ANTECEDENT: &str = "?";

/// Configuration for the resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum pronoun-chain depth chased per occurrence.
    pub max_depth: usize,
    /// Sentences of preceding context visible to the candidate finder.
    pub window_sentences: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            window_sentences: 3,
        }
    }
}

/// Outcome of resolving one pronoun occurrence.
///
/// Distinct from an empty candidate pool: an empty pool *becomes*
/// `Unresolved`, but so does the reflexive idiom guard with a full pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The terminal reference word.
    Antecedent(String),
    /// No antecedent found.
    Unresolved,
}

impl Resolution {
    /// The text rendered inside the bracketed marker.
    #[must_use]
    pub fn marker_text(&self) -> &str {
        match self {
            Resolution::Antecedent(word) => word,
            Resolution::Unresolved => NO_ANTECEDENT,
        }
    }

    /// Whether an antecedent was found.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Antecedent(_))
    }
}

/// One annotated pronoun occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Absolute span of the pronoun in the original text.
    pub span: Span,
    /// Pronoun surface form.
    pub surface: String,
    /// Grammatical class assigned by the classifier.
    pub class: PronounClass,
    /// Final resolution after chain chasing.
    pub resolution: Resolution,
}

/// Rule-based pronoun anaphora resolver.
///
/// Owns the lexicon and the morphology adapter; both are immutable for the
/// resolver's lifetime and shared by reference across occurrences.
///
/// # Example
///
/// ```rust
/// use anaphor::Resolver;
///
/// let resolver = Resolver::default();
/// let annotated = resolver.annotate("Маша пришла домой. Она устала.");
/// assert!(annotated.contains("Она [Маша]"));
/// ```
pub struct Resolver {
    lexicon: Lexicon,
    morph: Box<dyn MorphAnalyzer>,
    config: ResolverConfig,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Resolver {
    /// Create a resolver with the builtin lexicon and [`RuMorph`].
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            lexicon: Lexicon::builtin(),
            morph: Box::new(RuMorph::new()),
            config,
        }
    }

    /// Replace the lexicon.
    #[must_use]
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Replace the morphology adapter.
    #[must_use]
    pub fn with_morph(mut self, morph: Box<dyn MorphAnalyzer>) -> Self {
        self.morph = morph;
        self
    }

    /// Annotate every pronoun occurrence with its resolved antecedent.
    ///
    /// Inserts a ` [слово]` marker immediately after each pronoun span;
    /// unresolved occurrences get the literal sentinel. Text without
    /// pronoun-lexicon matches comes back unchanged.
    #[must_use]
    pub fn annotate(&self, text: &str) -> String {
        let annotations = self.resolve_occurrences(text);
        let mut result = String::with_capacity(text.len() + annotations.len() * 8);
        let mut copied = 0;
        for a in &annotations {
            result.push_str(&text[copied..a.span.end]);
            result.push_str(" [");
            result.push_str(a.resolution.marker_text());
            result.push(']');
            copied = a.span.end;
        }
        result.push_str(&text[copied..]);
        result
    }

    /// Resolve every pronoun occurrence without rewriting the text.
    ///
    /// Occurrences come back ordered by ascending position; this is the
    /// pure pass that [`Resolver::annotate`] serializes into markers.
    #[must_use]
    pub fn resolve_occurrences(&self, text: &str) -> Vec<Annotation> {
        let spans = tokenize::find_pronoun_spans(text, &self.lexicon);
        spans
            .iter()
            .map(|&span| {
                let surface = &text[span.start..span.end];
                let (class, first) = self.resolve_span(text, span, false);
                let resolution = self.chase(text, &spans, first);
                log::debug!(
                    "resolved {:?} at {}..{} ({}) -> {:?}",
                    surface,
                    span.start,
                    span.end,
                    class.as_label(),
                    resolution
                );
                Annotation {
                    span,
                    surface: surface.to_string(),
                    class,
                    resolution,
                }
            })
            .collect()
    }

    /// Resolve the pronoun at an absolute byte position.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` when the position is past the end of the text
    /// or not on a character boundary; both are contract violations.
    pub fn resolve_at(&self, text: &str, pos: usize) -> Result<Resolution> {
        if pos >= text.len() {
            return Err(Error::invalid_input(format!(
                "pronoun position {pos} out of bounds for text of {} bytes",
                text.len()
            )));
        }
        if !text.is_char_boundary(pos) {
            return Err(Error::invalid_input(format!(
                "pronoun position {pos} is not a character boundary"
            )));
        }
        let Some(token) = tokenize::word_at(text, pos) else {
            return Ok(Resolution::Unresolved);
        };
        let spans = tokenize::find_pronoun_spans(text, &self.lexicon);
        let (_, first) = self.resolve_span(text, token.span, false);
        Ok(self.chase(text, &spans, first))
    }

    /// One classify → gather → filter → select pass at a pronoun span.
    ///
    /// `prefer_non_pronoun` is set during chain chasing so that a chain
    /// step lands on a noun rather than hopping to yet another pronoun
    /// when the pool offers both.
    fn resolve_span(
        &self,
        text: &str,
        span: Span,
        prefer_non_pronoun: bool,
    ) -> (PronounClass, Resolution) {
        let surface = &text[span.start..span.end];
        let next = tokenize::next_word_after(text, span.end);
        let class = classify(
            surface,
            next.as_ref().map(|t| t.text),
            &self.lexicon,
            self.morph.as_ref(),
        );

        let finder = CandidateFinder::new(
            &self.lexicon,
            self.morph.as_ref(),
            self.config.window_sentences,
        );
        let pool = finder.find(text, span.start);
        log::trace!("pool for {surface:?}: {} candidates", pool.len());

        let sentences = tokenize::sentence_spans(text);
        let sentence = if sentences.is_empty() {
            Span::new(0, text.len())
        } else {
            sentences[tokenize::sentence_index_at(&sentences, span.start)]
        };
        let is_sentence_initial = tokenize::words_at(
            &text[sentence.start..sentence.end],
            sentence.start,
        )
        .first()
        .map(|t| t.span.start)
            == Some(span.start);

        let ctx = FilterContext {
            text,
            pronoun: surface,
            pronoun_span: span,
            sentence,
            is_sentence_initial,
            lexicon: &self.lexicon,
            morph: self.morph.as_ref(),
        };
        let outcome = filters::apply(class, &pool, &ctx);
        let resolution = self.select(outcome, span.start, text, prefer_non_pronoun);
        (class, resolution)
    }

    /// Pick the reference word out of a filter outcome.
    fn select(
        &self,
        outcome: FilterOutcome,
        pronoun_pos: usize,
        text: &str,
        prefer_non_pronoun: bool,
    ) -> Resolution {
        let pool = match outcome {
            FilterOutcome::NoAntecedent => return Resolution::Unresolved,
            FilterOutcome::Pool(pool) => pool,
        };
        let pool: Vec<Candidate> = if prefer_non_pronoun {
            let non_pronoun: Vec<Candidate> = pool
                .iter()
                .filter(|c| c.pos != PosTag::Pronoun)
                .cloned()
                .collect();
            if non_pronoun.is_empty() {
                pool
            } else {
                non_pronoun
            }
        } else {
            pool
        };
        match pool.len() {
            0 => Resolution::Unresolved,
            1 => Resolution::Antecedent(pool[0].surface.clone()),
            _ => rank(&pool, pronoun_pos, text, self.morph.as_ref())
                .first()
                .map(|c| Resolution::Antecedent(c.surface.clone()))
                .unwrap_or(Resolution::Unresolved),
        }
    }

    /// Chase a pronoun-valued resolution to a terminal referent.
    ///
    /// Bounded iterative loop with a no-progress check: stops when the
    /// reference word is not a located pronoun, repeats itself, resolves
    /// to nothing, or the depth bound is hit, whichever comes first.
    fn chase(&self, text: &str, pronoun_spans: &[Span], first: Resolution) -> Resolution {
        let mut current = first;
        for depth in 0..self.config.max_depth {
            let word = match &current {
                Resolution::Antecedent(word) => word.clone(),
                Resolution::Unresolved => break,
            };
            // First textual occurrence of the reference word as a pronoun.
            let Some(&span) = pronoun_spans
                .iter()
                .find(|s| text[s.start..s.end] == word)
            else {
                break;
            };
            let (_, next) = self.resolve_span(text, span, true);
            log::trace!("chase depth {depth}: {word:?} -> {next:?}");
            match next {
                Resolution::Antecedent(w) if w == word => break,
                Resolution::Unresolved => return Resolution::Unresolved,
                next => current = next,
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_simple_feminine() {
        let resolver = Resolver::default();
        let out = resolver.annotate("Маша пришла домой. Она устала.");
        assert_eq!(out, "Маша пришла домой. Она [Маша] устала.");
    }

    #[test]
    fn scenario_group() {
        let resolver = Resolver::default();
        let out = resolver.annotate("Иван и Пётр пришли. Они сели.");
        assert!(out.contains("Они [Иван и Петр]"), "got: {out}");
    }

    #[test]
    fn scenario_reflexive_possessive() {
        let resolver = Resolver::default();
        let out = resolver.annotate("Директор взял свою папку.");
        assert!(out.contains("свою [Директор]"), "got: {out}");
    }

    #[test]
    fn no_pronouns_is_identity() {
        let resolver = Resolver::default();
        let text = "Стол стоял в комнате.";
        assert_eq!(resolver.annotate(text), text);
    }

    #[test]
    fn empty_input() {
        let resolver = Resolver::default();
        assert_eq!(resolver.annotate(""), "");
    }

    #[test]
    fn resolve_at_contract_violations() {
        let resolver = Resolver::default();
        assert!(resolver.resolve_at("Она устала.", 1000).is_err());
        // byte 1 is inside the two-byte "О"
        assert!(resolver.resolve_at("Она устала.", 1).is_err());
    }

    #[test]
    fn resolve_at_on_word() {
        let resolver = Resolver::default();
        let text = "Маша пришла домой. Она устала.";
        let pos = text.find("Она").unwrap();
        let res = resolver.resolve_at(text, pos).unwrap();
        assert_eq!(res, Resolution::Antecedent("Маша".to_string()));
    }

    #[test]
    fn occurrences_are_ordered() {
        let resolver = Resolver::default();
        let text = "Маша пришла. Она устала. Она спала.";
        let annotations = resolver.resolve_occurrences(text);
        assert_eq!(annotations.len(), 2);
        assert!(annotations[0].span.start < annotations[1].span.start);
    }

    #[test]
    fn length_accounting() {
        let resolver = Resolver::default();
        let text = "Маша пришла домой. Она устала.";
        let out = resolver.annotate(text);
        let annotations = resolver.resolve_occurrences(text);
        let marker_len: usize = annotations
            .iter()
            .map(|a| " []".len() + a.resolution.marker_text().len())
            .sum();
        assert_eq!(out.len(), text.len() + marker_len);
    }
}
