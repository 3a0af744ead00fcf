//! Property tests for the resolution pipeline invariants.

use anaphor::{Lexicon, Resolver};
use proptest::prelude::*;

fn resolver() -> Resolver {
    Resolver::default()
}

proptest! {
    /// Texts without pronoun-lexicon matches pass through unchanged.
    #[test]
    fn identity_on_latin_text(text in "[a-zA-Z0-9 .,!?\n]{0,200}") {
        let out = resolver().annotate(&text);
        prop_assert_eq!(out, text);
    }

    /// Output length is input length plus the sum of marker lengths.
    #[test]
    fn length_accounting(words in prop::collection::vec(
        prop::sample::select(vec![
            "Маша", "Иван", "стол", "книга", "пришла", "взял",
            "она", "он", "они", "его", "себя", "свою", "который", "и",
        ]),
        0..30,
    )) {
        let text = words.join(" ");
        let r = resolver();
        let out = r.annotate(&text);
        let marker_len: usize = r
            .resolve_occurrences(&text)
            .iter()
            .map(|a| " []".len() + a.resolution.marker_text().len())
            .sum();
        prop_assert_eq!(out.len(), text.len() + marker_len);
    }

    /// Markers land immediately after their pronoun spans, in order.
    #[test]
    fn markers_follow_spans(words in prop::collection::vec(
        prop::sample::select(vec!["Маша", "пришла", "она", "он", "стол"]),
        1..20,
    )) {
        let text = words.join(" ");
        let r = resolver();
        let annotations = r.resolve_occurrences(&text);
        let out = r.annotate(&text);

        // Rebuild the expected output from the pure resolution pass.
        let mut expected = String::new();
        let mut copied = 0;
        for a in &annotations {
            expected.push_str(&text[copied..a.span.end]);
            expected.push_str(" [");
            expected.push_str(a.resolution.marker_text());
            expected.push(']');
            copied = a.span.end;
        }
        expected.push_str(&text[copied..]);
        prop_assert_eq!(out, expected);
    }

    /// All-pronoun texts terminate: chain chasing is depth-bounded even on
    /// adversarial cyclic references.
    #[test]
    fn cyclic_chains_terminate(words in prop::collection::vec(
        prop::sample::select(vec!["он", "она", "они", "его", "ее", "себя"]),
        1..15,
    )) {
        let text = words.join(" ");
        let r = resolver();
        let annotations = r.resolve_occurrences(&text);
        // every occurrence annotated exactly once
        let lexicon = Lexicon::builtin();
        let located = anaphor::tokenize::find_pronoun_spans(&text, &lexicon);
        prop_assert_eq!(annotations.len(), located.len());
    }
}
