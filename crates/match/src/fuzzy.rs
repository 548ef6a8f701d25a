//! Word-order-insensitive string similarity.
//!
//! `ratio` is the normalized Indel similarity
//! `100 * 2 * LCS(a, b) / (|a| + |b|)` over chars, rounded half away from
//! zero. The Indel similarity itself comes from `rapidfuzz`. `token_sort_score`
//! lowercases, sorts whitespace tokens and rejoins them with single spaces
//! before applying `ratio`.

use rapidfuzz::distance::indel;

/// Similarity in `0..=100`. Two empty strings score 100.
pub fn ratio(a: &str, b: &str) -> u8 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100;
    }
    // 2 * LCS
    let similarity = indel::similarity(a.chars(), b.chars());
    let score = (100.0 * similarity as f64 / total as f64).round();
    score.clamp(0.0, 100.0) as u8
}

/// Token-sort similarity in `0..=100`.
///
/// Both empty scores 100; exactly one empty scores 0.
pub fn token_sort_score(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
