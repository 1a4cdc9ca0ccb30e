//! Bounded edit distance for typo-tolerant term matching.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance, so terms that
//! differ in length by more than the bound are rejected before the DP runs.

/// Largest edit distance ever allowed, however long the term.
pub const MAX_FUZZY_DISTANCE: usize = 6;

/// Edits allowed for a term of `term_len` chars at the given fuzziness.
///
/// Fuzziness below 1 is a fraction of the term length, rounded and capped
/// at [`MAX_FUZZY_DISTANCE`]. Fuzziness of 1 or more is an absolute count.
pub fn max_distance(term_len: usize, fuzziness: f64) -> usize {
    if fuzziness <= 0.0 {
        0
    } else if fuzziness < 1.0 {
        ((term_len as f64 * fuzziness).round() as usize).min(MAX_FUZZY_DISTANCE)
    } else {
        fuzziness as usize
    }
}

/// Levenshtein distance between `a` and `b` if it is at most `max`.
///
/// Abandons the DP as soon as every cell of a row exceeds `max`.
pub fn distance_within(a: &str, b: &str, max: usize) -> Option<usize> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max {
        return None;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return None;
        }
    }

    Some(dp[b_len]).filter(|d| *d <= max)
}
