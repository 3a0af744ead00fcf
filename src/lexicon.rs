//! Static lexicon sets: pronoun classes, special noun lists, idioms.
//!
//! The resolver is lexicon-driven: every pronoun occurrence is located by
//! membership in one of five pronoun-class sets, and a handful of noun lists
//! drive the candidate expansion rules (collective nouns, common-gender
//! nouns) and the reflexive idiom guard.
//!
//! Sets are loaded once from line-oriented text sources and are immutable
//! afterwards; every component receives the `Lexicon` by reference. The
//! default word lists ship inside the binary via `include_str!`, and
//! [`Lexicon::from_dir`] loads the same file layout from disk for users who
//! want to swap lists without rebuilding.

use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::morph::normalize_word;

/// File names looked up by [`Lexicon::from_dir`], in field order.
pub const LEXICON_FILES: [&str; 8] = [
    "personal.txt",
    "possessive.txt",
    "personal_possessive.txt",
    "reflexive.txt",
    "relative.txt",
    "collective.txt",
    "common_gender.txt",
    "idioms.txt",
];

/// Immutable word lists consumed by the resolution pipeline.
///
/// The five pronoun-class sets are disjoint by convention: syncretic forms
/// (его/ее/их) live only in `ambiguous` and are disambiguated by the
/// classifier, never by set order.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Personal pronoun forms (я, ты, он, она, они, ...).
    pub personal: HashSet<String>,
    /// Possessive pronoun forms (мой, твой, наш, ваш, свой, ...).
    pub possessive: HashSet<String>,
    /// Forms ambiguous between personal and possessive readings (его, ее, их).
    pub ambiguous: HashSet<String>,
    /// Reflexive pronoun forms (себя, себе, собой, собою).
    pub reflexive: HashSet<String>,
    /// Relative pronoun forms (кто, что, который, чей, ...).
    pub relative: HashSet<String>,
    /// Collective nouns that take both singular and plural readings.
    pub collective: HashSet<String>,
    /// Common-gender nouns that take both masculine and feminine readings.
    pub common_gender: HashSet<String>,
    /// Idiom phrases containing reflexive forms (non-referential uses).
    pub idioms: HashSet<String>,
}

fn word_set(source: &str) -> HashSet<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(normalize_word)
        .collect()
}

impl Lexicon {
    /// Construct the lexicon from the word lists embedded in the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            personal: word_set(include_str!("../data/personal.txt")),
            possessive: word_set(include_str!("../data/possessive.txt")),
            ambiguous: word_set(include_str!("../data/personal_possessive.txt")),
            reflexive: word_set(include_str!("../data/reflexive.txt")),
            relative: word_set(include_str!("../data/relative.txt")),
            collective: word_set(include_str!("../data/collective.txt")),
            common_gender: word_set(include_str!("../data/common_gender.txt")),
            idioms: word_set(include_str!("../data/idioms.txt")),
        }
    }

    /// Load the lexicon from a directory holding the standard file layout.
    ///
    /// Expects the file names in [`LEXICON_FILES`]. Lines are trimmed,
    /// blank lines skipped, and every entry normalized (lowercased, ё→е).
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut sets = Vec::with_capacity(LEXICON_FILES.len());
        for name in LEXICON_FILES {
            let raw = std::fs::read_to_string(dir.join(name))?;
            sets.push(word_set(&raw));
        }
        let mut it = sets.into_iter();
        Ok(Self {
            personal: it.next().unwrap_or_default(),
            possessive: it.next().unwrap_or_default(),
            ambiguous: it.next().unwrap_or_default(),
            reflexive: it.next().unwrap_or_default(),
            relative: it.next().unwrap_or_default(),
            collective: it.next().unwrap_or_default(),
            common_gender: it.next().unwrap_or_default(),
            idioms: it.next().unwrap_or_default(),
        })
    }

    /// Whether a normalized form belongs to any pronoun-class set.
    #[must_use]
    pub fn is_pronoun(&self, normalized: &str) -> bool {
        self.personal.contains(normalized)
            || self.possessive.contains(normalized)
            || self.ambiguous.contains(normalized)
            || self.reflexive.contains(normalized)
            || self.relative.contains(normalized)
    }

    /// Total number of pronoun forms across all five class sets.
    #[must_use]
    pub fn pronoun_count(&self) -> usize {
        self.personal.len()
            + self.possessive.len()
            + self.ambiguous.len()
            + self.reflexive.len()
            + self.relative.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sets_nonempty() {
        let lex = Lexicon::builtin();
        assert!(!lex.personal.is_empty());
        assert!(!lex.possessive.is_empty());
        assert!(!lex.ambiguous.is_empty());
        assert!(!lex.reflexive.is_empty());
        assert!(!lex.relative.is_empty());
        assert!(!lex.collective.is_empty());
        assert!(!lex.common_gender.is_empty());
        assert!(!lex.idioms.is_empty());
    }

    #[test]
    fn membership_is_normalized() {
        let lex = Lexicon::builtin();
        assert!(lex.is_pronoun("она"));
        assert!(lex.is_pronoun("себя"));
        assert!(lex.is_pronoun("который"));
        // ё folds to е during normalization
        assert!(lex.is_pronoun(&normalize_word("неё")));
        assert!(!lex.is_pronoun("стол"));
    }

    #[test]
    fn ambiguous_forms_live_in_one_set() {
        let lex = Lexicon::builtin();
        for form in ["его", "ее", "их"] {
            assert!(lex.ambiguous.contains(form));
            assert!(!lex.personal.contains(form));
            assert!(!lex.possessive.contains(form));
        }
    }
}
