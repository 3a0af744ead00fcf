//! Type-specific agreement filters.
//!
//! Each filter receives the full candidate pool and a [`FilterContext`]
//! describing the pronoun occurrence, and narrows the pool using agreement
//! and positional rules. Filters are pure: they never mutate the pool and
//! carry no state between occurrences, which keeps each one independently
//! testable.
//!
//! A filter can end with an empty pool (nothing survived, a legitimate
//! outcome) or with the explicit no-antecedent verdict (the reflexive
//! filter's idiom guard); the two are distinct.

mod personal;
mod possessive;
mod reflexive;
mod relative;

pub use personal::filter_personal;
pub use possessive::filter_possessive;
pub use reflexive::filter_reflexive;
pub use relative::filter_relative;

use crate::candidate::{Candidate, Span};
use crate::classify::PronounClass;
use crate::lexicon::Lexicon;
use crate::morph::MorphAnalyzer;

/// Everything a filter may consult about one pronoun occurrence.
pub struct FilterContext<'a> {
    /// The full input text.
    pub text: &'a str,
    /// Pronoun surface form, original case.
    pub pronoun: &'a str,
    /// Absolute span of the pronoun occurrence.
    pub pronoun_span: Span,
    /// Absolute span of the sentence containing the pronoun.
    pub sentence: Span,
    /// Whether the pronoun is the first word of its sentence.
    pub is_sentence_initial: bool,
    /// Lexicon sets.
    pub lexicon: &'a Lexicon,
    /// Morphology adapter.
    pub morph: &'a dyn MorphAnalyzer,
}

/// Result of one filter pass.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Surviving candidates, possibly empty.
    Pool(Vec<Candidate>),
    /// Resolution is known to be impossible (idiomatic use).
    NoAntecedent,
}

/// Dispatch the pool through the filter matching the pronoun class.
///
/// `PronounClass::None` yields an empty pool: no resolution is attempted
/// for unclassifiable forms.
#[must_use]
pub fn apply(class: PronounClass, pool: &[Candidate], ctx: &FilterContext<'_>) -> FilterOutcome {
    match class {
        PronounClass::Personal => FilterOutcome::Pool(filter_personal(pool, ctx)),
        PronounClass::Possessive => FilterOutcome::Pool(filter_possessive(pool, ctx)),
        PronounClass::Reflexive => filter_reflexive(pool, ctx),
        PronounClass::Relative => FilterOutcome::Pool(filter_relative(pool, ctx)),
        PronounClass::None => FilterOutcome::Pool(Vec::new()),
    }
}
