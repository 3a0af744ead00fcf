//! Personal pronoun filter.
//!
//! Gender/number agreement with wildcard semantics, then the lexical
//! special cases: animacy for informal ты, the capitalized formal-address
//! Вы (polite singular), and the lowercase literal-plural вы.

use super::FilterContext;
use crate::candidate::Candidate;
use crate::morph::{normalize_word, Animacy, Number, PosTag};

/// Formal-address surface forms, capitalized В.
fn is_formal_address(surface: &str) -> bool {
    matches!(normalize_word(surface).as_str(), "вы" | "вас" | "вам" | "вами")
        && surface.chars().next().is_some_and(char::is_uppercase)
}

fn is_lowercase_you(surface: &str) -> bool {
    matches!(normalize_word(surface).as_str(), "вы" | "вас" | "вам" | "вами")
        && surface.chars().next().is_some_and(char::is_lowercase)
}

/// Narrow the pool for a personal pronoun occurrence.
#[must_use]
pub fn filter_personal(pool: &[Candidate], ctx: &FilterContext<'_>) -> Vec<Candidate> {
    let pron = ctx.morph.analyze(ctx.pronoun);
    let formal = is_formal_address(ctx.pronoun);

    // Agreement pass. Reflexive forms can never antecede a personal pronoun.
    let mut filtered: Vec<Candidate> = pool
        .iter()
        .filter(|c| !ctx.lexicon.reflexive.contains(&c.normalized))
        .filter(|c| {
            if c.is_group {
                c.number == pron.number || pron.number == Number::Unspecified
            } else if !formal {
                c.gender.agrees(pron.gender) && c.number.agrees(pron.number)
            } else {
                // Formal address is resolved by the special rules below.
                true
            }
        })
        .cloned()
        .collect();

    // Informal singular "ты" addresses animate referents only.
    if normalize_word(ctx.pronoun) == "ты" {
        filtered.retain(|c| is_animate(c, ctx));
    }

    if formal {
        if ctx.is_sentence_initial {
            // Sentence-opening Вы stays ambiguous between polite singular
            // and plural; any number survives.
            filtered.retain(|c| {
                matches!(
                    c.number,
                    Number::Singular | Number::Plural | Number::Unspecified
                )
            });
        } else {
            filtered.retain(|c| c.number == Number::Singular || c.is_group);
        }
    }

    if is_lowercase_you(ctx.pronoun) {
        filtered.retain(|c| c.number == Number::Plural || c.is_group);
    }

    filtered
}

fn is_animate(candidate: &Candidate, ctx: &FilterContext<'_>) -> bool {
    if candidate.pos == PosTag::Noun {
        ctx.morph.analyze(&candidate.surface).animacy == Animacy::Animate
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::FilterContext;
    use super::*;
    use crate::candidate::{CandidateFinder, Span};
    use crate::lexicon::Lexicon;
    use crate::morph::RuMorph;
    use crate::tokenize;

    fn run(text: &str, pronoun: &str) -> Vec<Candidate> {
        let lex = Lexicon::builtin();
        let morph = RuMorph::new();
        let pos = text.find(pronoun).unwrap();
        let pool = CandidateFinder::new(&lex, &morph, 3).find(text, pos);
        let sentences = tokenize::sentence_spans(text);
        let sentence = sentences[tokenize::sentence_index_at(&sentences, pos)];
        let first_word = tokenize::words_at(&text[sentence.start..sentence.end], sentence.start)
            .first()
            .map(|t| t.span.start);
        let ctx = FilterContext {
            text,
            pronoun,
            pronoun_span: Span::new(pos, pos + pronoun.len()),
            sentence,
            is_sentence_initial: first_word == Some(pos),
            lexicon: &lex,
            morph: &morph,
        };
        filter_personal(&pool, &ctx)
    }

    #[test]
    fn gender_agreement_rejects_mismatch() {
        let survivors = run("Иван и Маша пришли. Она устала.", "Она");
        assert!(survivors.iter().any(|c| c.surface == "Маша"));
        assert!(!survivors.iter().any(|c| c.surface == "Иван"));
        // the plural group cannot antecede singular "она"
        assert!(!survivors.iter().any(|c| c.is_group));
    }

    #[test]
    fn plural_pronoun_keeps_group() {
        let survivors = run("Иван и Пётр пришли. Они сели.", "Они");
        assert!(survivors.iter().any(|c| c.is_group));
        // singular candidates lose number agreement
        assert!(!survivors.iter().any(|c| c.surface == "Иван"));
    }

    #[test]
    fn informal_you_requires_animacy() {
        let survivors = run("Стол стоял. Брат сказал: «ты идешь»", "ты");
        assert!(survivors.iter().any(|c| c.surface == "Брат"));
        assert!(!survivors.iter().any(|c| c.surface == "Стол"));
    }

    #[test]
    fn formal_address_mid_sentence_requires_singular_or_group() {
        let survivors = run("Гости пришли. Доктор сказал: мы Вас ждали.", "Вас");
        for c in &survivors {
            assert!(c.number == Number::Singular || c.is_group, "{c:?}");
        }
    }

    #[test]
    fn lowercase_you_requires_plural() {
        let survivors = run("Гость пришел. Гости сказали: мы вас ждали.", "вас");
        for c in &survivors {
            assert!(c.number == Number::Plural || c.is_group, "{c:?}");
        }
    }
}
