//! Pronoun classification.
//!
//! Assigns one of five grammatical classes to a pronoun occurrence. The
//! only context consulted is the next word: syncretic forms (его/ее/их)
//! read as possessive before a noun and as personal otherwise. Everything
//! else is lexicon membership in priority order.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::morph::{normalize_word, MorphAnalyzer, PosTag};

/// Grammatical class of a pronoun occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PronounClass {
    /// Personal (я, ты, он, она, они, ...).
    Personal,
    /// Possessive (мой, свой, его-before-noun, ...).
    Possessive,
    /// Reflexive (себя, себе, собой).
    Reflexive,
    /// Relative (кто, что, который, чей, ...).
    Relative,
    /// Not a classifiable pronoun; no resolution is attempted.
    None,
}

impl PronounClass {
    /// Human-readable label.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            PronounClass::Personal => "personal",
            PronounClass::Possessive => "possessive",
            PronounClass::Reflexive => "reflexive",
            PronounClass::Relative => "relative",
            PronounClass::None => "none",
        }
    }
}

/// Classifier states, one per check; transitions run strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    CheckAmbiguous,
    DisambiguateByNextPos,
    CheckPersonal,
    CheckPossessive,
    CheckReflexive,
    CheckRelative,
    Done(PronounClass),
}

/// Classify a pronoun by surface form and the word following it.
///
/// `next_word` is the first word after the pronoun, if any; it only
/// matters for the syncretic forms.
#[must_use]
pub fn classify(
    word: &str,
    next_word: Option<&str>,
    lexicon: &Lexicon,
    morph: &dyn MorphAnalyzer,
) -> PronounClass {
    let norm = normalize_word(word);
    let mut state = State::CheckAmbiguous;
    loop {
        state = match state {
            State::CheckAmbiguous => {
                if lexicon.ambiguous.contains(&norm) {
                    State::DisambiguateByNextPos
                } else {
                    State::CheckPersonal
                }
            }
            State::DisambiguateByNextPos => {
                let next_is_noun = next_word.is_some_and(|w| morph.pos(w) == PosTag::Noun);
                if next_is_noun {
                    State::Done(PronounClass::Possessive)
                } else {
                    State::Done(PronounClass::Personal)
                }
            }
            State::CheckPersonal => {
                if lexicon.personal.contains(&norm) {
                    State::Done(PronounClass::Personal)
                } else {
                    State::CheckPossessive
                }
            }
            State::CheckPossessive => {
                if lexicon.possessive.contains(&norm) {
                    State::Done(PronounClass::Possessive)
                } else {
                    State::CheckReflexive
                }
            }
            State::CheckReflexive => {
                if lexicon.reflexive.contains(&norm) {
                    State::Done(PronounClass::Reflexive)
                } else {
                    State::CheckRelative
                }
            }
            State::CheckRelative => {
                if lexicon.relative.contains(&norm) {
                    State::Done(PronounClass::Relative)
                } else {
                    State::Done(PronounClass::None)
                }
            }
            State::Done(class) => return class,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::RuMorph;

    fn classify_pair(word: &str, next: Option<&str>) -> PronounClass {
        let lex = Lexicon::builtin();
        let morph = RuMorph::new();
        classify(word, next, &lex, &morph)
    }

    #[test]
    fn plain_classes() {
        assert_eq!(classify_pair("она", None), PronounClass::Personal);
        assert_eq!(classify_pair("свою", None), PronounClass::Possessive);
        assert_eq!(classify_pair("себя", None), PronounClass::Reflexive);
        assert_eq!(classify_pair("который", None), PronounClass::Relative);
        assert_eq!(classify_pair("стол", None), PronounClass::None);
    }

    #[test]
    fn syncretic_before_noun_is_possessive() {
        assert_eq!(classify_pair("его", Some("папку")), PronounClass::Possessive);
        assert_eq!(classify_pair("её", Some("дом")), PronounClass::Possessive);
    }

    #[test]
    fn syncretic_elsewhere_is_personal() {
        assert_eq!(classify_pair("его", Some("вчера")), PronounClass::Personal);
        assert_eq!(classify_pair("его", None), PronounClass::Personal);
        assert_eq!(classify_pair("их", Some("увидел")), PronounClass::Personal);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(classify_pair("ОНА", None), PronounClass::Personal);
        assert_eq!(classify_pair("Которая", None), PronounClass::Relative);
    }
}
