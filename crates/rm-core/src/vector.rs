use std::collections::HashMap;

use crate::lexicon::Lexicon;

/// Sparse term-frequency vector: normalized token -> positive weight. Built
/// fresh for each scoring call, never stores zero entries.
pub type TermVector = HashMap<String, u32>;

/// Build a weighted term vector from a token sequence.
///
/// Each occurrence counts 1; occurrences of recognized skills count
/// `1 + skill_boost` so cosine similarity favors domain-relevant overlap over
/// generic prose overlap.
pub fn vectorize(tokens: &[String], lexicon: &Lexicon, skill_boost: u32) -> TermVector {
    let mut vector = TermVector::new();

    for token in tokens {
        let weight = if lexicon.is_skill(token) {
            1 + skill_boost
        } else {
            1
        };
        *vector.entry(token.clone()).or_insert(0) += weight;
    }

    vector
}

/// Cosine similarity between two sparse vectors, over the union of their keys
/// (absent keys contribute 0). Returns 0.0 when either vector has zero
/// magnitude, so empty inputs never divide by zero.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(token, &wa)| b.get(token).map(|&wb| f64::from(wa) * f64::from(wb)))
        .sum();

    let magnitude =
        |v: &TermVector| v.values().map(|&w| f64::from(w).powi(2)).sum::<f64>().sqrt();

    let (mag_a, mag_b) = (magnitude(a), magnitude(b));
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}
