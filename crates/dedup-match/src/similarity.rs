//! Edit distance and normalized similarity.
//!
//! Both functions work on Unicode scalar values, so `"é"` counts as one
//! character. The name stage runs [`similarity`] once per master record for
//! every small record, which makes it the dominant cost of a run.

use rapidfuzz::distance::levenshtein;

/// Levenshtein distance: minimum single-character insertions, deletions, or
/// substitutions turning `a` into `b`.
pub fn distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Similarity in `[0, 1]`: `1 - distance / max_len`, and `1.0` for two empty strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    (longest - distance(a, b)) as f64 / longest as f64
}

/// Round a score in `[0, 1]` to two decimals.
///
/// Rounds the exact binary value of `score`, so `0.825` (stored just below
/// 0.825) becomes `0.82`; exact ties such as `0.875` go up.
pub fn round_score(score: f64) -> f64 {
    f64::from(hundredths(score)) / 100.0
}

/// Nearest whole number of hundredths to the exact value of `score`, ties up.
fn hundredths(score: f64) -> u32 {
    if score.is_nan() || score <= 0.0 {
        return 0;
    }
    if score >= 1.0 {
        return 100;
    }
    // score = mantissa * 2^-shift exactly, with shift >= 1 below 1.0.
    let bits = score.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, shift) = if exponent == 0 {
        (fraction, 1074)
    } else {
        (fraction | (1u64 << 52), 1075 - exponent)
    };
    // mantissa * 100 < 2^60, so larger shifts round to zero.
    if shift > 61 {
        return 0;
    }
    let scaled = u128::from(mantissa) * 100;
    let whole = scaled >> shift;
    let remainder = scaled & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);
    let rounded = if remainder >= half { whole + 1 } else { whole };
    rounded as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basic_cases() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", "abcd"), 4);
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("jon smith", "john smith"), 1);
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(distance("café", "cafe"), 1);
        assert!((similarity("café", "cafe") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn similarity_of_empty_strings_is_one() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn similarity_one_edit_over_ten() {
        assert_eq!(similarity("jon smith", "john smith"), 0.9);
    }

    #[test]
    fn round_score_uses_exact_binary_value() {
        assert_eq!(round_score(33.0 / 40.0), 0.82);
        assert_eq!(round_score(39.0 / 40.0), 0.97);
        assert_eq!(round_score(7.0 / 40.0), 0.17);
        assert_eq!(round_score(17.0 / 40.0), 0.42);
    }

    #[test]
    fn round_score_exact_ties_go_up() {
        assert_eq!(round_score(0.875), 0.88);
        assert_eq!(round_score(0.125), 0.13);
        assert_eq!(round_score(0.625), 0.63);
    }

    #[test]
    fn round_score_plain_cases() {
        assert_eq!(round_score(8.0 / 9.0), 0.89);
        assert_eq!(round_score(0.9), 0.9);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.0), 0.0);
        assert_eq!(round_score(0.004), 0.0);
        assert_eq!(round_score(0.005), 0.01);
    }
}
