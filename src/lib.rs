//! # anaphor
//!
//! Rule-based pronoun anaphora resolution for Russian text.
//!
//! For every pronoun occurrence, anaphor finds the most likely antecedent
//! (a noun, a name, a coordinated noun group, or a speaker identity) and
//! annotates the text with the resolution, chasing pronoun-to-pronoun
//! chains to a terminal referent.
//!
//! ## Quick Start
//!
//! ```rust
//! use anaphor::Resolver;
//!
//! let resolver = Resolver::default();
//! let out = resolver.annotate("Маша пришла домой. Она устала.");
//! assert_eq!(out, "Маша пришла домой. Она [Маша] устала.");
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | What it does |
//! |-------|--------|--------------|
//! | Locate | [`tokenize`] | find pronoun occurrences by lexicon membership |
//! | Classify | [`classify`] | personal / possessive / reflexive / relative |
//! | Gather | [`candidate`] | candidate pool from a bounded context window |
//! | Filter | [`filters`] | type-specific agreement and positional rules |
//! | Rank | [`rank`] | subject position + frequency + proximity scoring |
//! | Drive | [`resolve`] | chain chasing and marker insertion |
//!
//! ## Design Philosophy
//!
//! - **Rule-based**: no statistical model, no training data; the behavior
//!   is fully determined by the lexicons and the agreement rules
//! - **Lexicon-driven**: pronoun classes, collective nouns, common-gender
//!   nouns, and reflexive idioms are plain word lists, swappable at load
//!   time via [`Lexicon::from_dir`]
//! - **Trait seams**: morphology sits behind the [`MorphAnalyzer`] trait;
//!   the built-in [`RuMorph`] is a best-effort suffix analyzer, and a
//!   dictionary-backed replacement plugs in without touching the pipeline
//! - **Total core**: resolution never fails; unknown words become
//!   wildcard attributes, empty pools become the no-antecedent sentinel
//!
//! ## Annotation format
//!
//! Markers are inserted immediately after each pronoun span: the terminal
//! reference word in brackets, or `[?]` when no antecedent survives
//! filtering.

#![warn(missing_docs)]

pub mod candidate;
pub mod classify;
mod error;
pub mod filters;
pub mod lexicon;
pub mod morph;
pub mod rank;
pub mod resolve;
pub mod tokenize;

pub use candidate::{Candidate, CandidateFinder, Span};
pub use classify::{classify, PronounClass};
pub use error::{Error, Result};
pub use lexicon::Lexicon;
pub use morph::{
    normalize_word, Animacy, Case, Gender, MorphAnalysis, MorphAnalyzer, Number, Person, PosTag,
    RuMorph,
};
pub use resolve::{Annotation, Resolution, Resolver, ResolverConfig, NO_ANTECEDENT};

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use anaphor::prelude::*;
    //!
    //! let out = Resolver::default().annotate("Директор взял свою папку.");
    //! assert!(out.contains("[Директор]"));
    //! ```
    pub use crate::candidate::{Candidate, Span};
    pub use crate::classify::PronounClass;
    pub use crate::error::{Error, Result};
    pub use crate::lexicon::Lexicon;
    pub use crate::morph::{MorphAnalyzer, RuMorph};
    pub use crate::resolve::{Annotation, Resolution, Resolver, ResolverConfig};
}

/// Annotate text with a default resolver (builtin lexicon, [`RuMorph`]).
///
/// Convenience wrapper over [`Resolver::annotate`] for one-shot use; build
/// a [`Resolver`] once when processing many texts.
#[must_use]
pub fn annotate(text: &str) -> String {
    Resolver::default().annotate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_annotate() {
        let out = annotate("Маша пришла домой. Она устала.");
        assert!(out.contains("[Маша]"));
    }

    #[test]
    fn top_level_identity_without_pronouns() {
        let text = "Стол стоял у окна.";
        assert_eq!(annotate(text), text);
    }
}
