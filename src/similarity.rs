//! String-match features for mention/candidate scoring.
//!
//! Pure functions shared by candidate generation and ranking. All
//! measures operate on [`normalize_term`]-folded text so that case and
//! whitespace differences never affect scores.

use std::collections::HashSet;

/// Fold a term for lookup and comparison: lowercase, collapse runs of
/// whitespace to single spaces, trim.
///
/// # Examples
///
/// ```
/// use termlink::similarity::normalize_term;
///
/// assert_eq!(normalize_term("  Colorectal   Cancer "), "colorectal cancer");
/// ```
#[must_use]
pub fn normalize_term(s: &str) -> String {
    s.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Token overlap between two terms: the Jaccard coefficient over their
/// whitespace-token sets, after normalization.
///
/// Returns a value in `[0.0, 1.0]`; both inputs empty → 0.0.
///
/// # Examples
///
/// ```
/// use termlink::similarity::token_overlap;
///
/// // "colon cancer" vs "cancer of colon": {colon, cancer} ∩ {cancer, of, colon}
/// let overlap = token_overlap("colon cancer", "cancer of colon");
/// assert!((overlap - 2.0 / 3.0).abs() < 1e-9);
/// assert_eq!(token_overlap("anemia", "anemia"), 1.0);
/// ```
#[must_use]
pub fn token_overlap(a: &str, b: &str) -> f64 {
    let a = normalize_term(a);
    let b = normalize_term(b);
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();

    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Dice coefficient over padded character trigrams.
///
/// Terms are normalized and padded with two leading/trailing marker
/// characters, so short strings still produce trigrams and word
/// boundaries are weighted. Returns a value in `[0.0, 1.0]`; both
/// inputs empty → 0.0.
///
/// # Examples
///
/// ```
/// use termlink::similarity::trigram_dice;
///
/// assert_eq!(trigram_dice("anemia", "anemia"), 1.0);
/// assert!(trigram_dice("anemia", "anaemia") > 0.5);
/// assert!(trigram_dice("anemia", "fracture") < 0.2);
/// ```
#[must_use]
pub fn trigram_dice(a: &str, b: &str) -> f64 {
    let grams_a = trigrams(&normalize_term(a));
    let grams_b = trigrams(&normalize_term(b));

    if grams_a.is_empty() && grams_b.is_empty() {
        return 0.0;
    }
    let shared = grams_a.intersection(&grams_b).count();
    2.0 * shared as f64 / (grams_a.len() + grams_b.len()) as f64
}

/// Padded character trigrams of a normalized term.
fn trigrams(s: &str) -> HashSet<[char; 3]> {
    if s.is_empty() {
        return HashSet::new();
    }
    let padded: Vec<char> = std::iter::repeat('\u{2}')
        .take(2)
        .chain(s.chars())
        .chain(std::iter::repeat('\u{3}').take(2))
        .collect();
    padded.windows(3).map(|w| [w[0], w[1], w[2]]).collect()
}
