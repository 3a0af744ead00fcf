//! Candidate ranking.
//!
//! Invoked only when a filter leaves more than one survivor. The score is
//! deliberately coarse:
//!
//! - +2 for subject position (nominative, in the first third of the text),
//! - +N for the occurrence count of the candidate's normalized form across
//!   the whole pool,
//! - +2 for sitting at the minimum distance to the pronoun among the pool.
//!
//! Synthesized candidates have no span, count as infinitely distant, and
//! can never win the proximity bonus. The sort is stable: ties keep
//! discovery order.

use std::collections::HashMap;

use crate::candidate::{Candidate, Span};
use crate::morph::MorphAnalyzer;

/// Order a pool by descending score, stable on ties.
#[must_use]
pub fn rank(
    pool: &[Candidate],
    pronoun_pos: usize,
    text: &str,
    morph: &dyn MorphAnalyzer,
) -> Vec<Candidate> {
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for c in pool {
        *frequency.entry(c.normalized.as_str()).or_insert(0) += 1;
    }

    let distances: Vec<Option<usize>> = pool
        .iter()
        .map(|c| c.span.map(|s| pronoun_pos.abs_diff(s.start)))
        .collect();
    let min_distance = distances.iter().flatten().min().copied();

    let full_range = Span::new(0, text.len());
    let mut scored: Vec<(i64, usize, &Candidate)> = pool
        .iter()
        .zip(&distances)
        .enumerate()
        .map(|(index, (c, dist))| {
            let mut score: i64 = 0;
            if c.is_subject_in(morph, full_range) {
                score += 2;
            }
            score += frequency.get(c.normalized.as_str()).copied().unwrap_or(0) as i64;
            if let (Some(d), Some(min)) = (dist, min_distance) {
                if *d == min {
                    score += 2;
                }
            }
            (score, index, c)
        })
        .collect();

    // Stable by construction: descending score, ascending discovery index.
    scored.sort_by_key(|(score, index, _)| (-score, *index));
    scored.into_iter().map(|(_, _, c)| c.clone()).collect()
}
