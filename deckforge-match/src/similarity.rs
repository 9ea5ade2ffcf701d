//! Similarity utilities: edit distance and token-overlap scoring.
//!
//! The numeric thresholds here are part of the resolution contract;
//! the resolver consumes them by name, never as inline literals.

/// Fraction of query tokens that must match for a token-overlap hit.
pub const TOKEN_OVERLAP_THRESHOLD: f64 = 0.7;

/// Per-token edit-distance tolerance for token-overlap scoring.
pub const TOKEN_EDIT_DISTANCE: usize = 2;

/// Whole-key edit-distance tolerance for the last-resort tier.
pub const WHOLE_NAME_EDIT_DISTANCE: usize = 3;

/// Tokens shorter than this are discarded before scoring.
const MIN_TOKEN_LEN: usize = 3;

/// Levenshtein edit distance, full dynamic-programming matrix.
///
/// Single-character insert, delete, and substitute all cost 1.
/// `edit_distance(x, x) == 0` and the function is symmetric.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

/// Score how well a candidate key covers a query key's tokens.
///
/// Both keys are split on `_`; tokens of length ≤ 2 are discarded. A
/// query token counts as matched when the candidate key contains it as
/// a substring, when it contains a candidate token as a substring, or
/// when some candidate token is within [`TOKEN_EDIT_DISTANCE`].
/// Returns the matched fraction (1.0 for identical token sets, 0.0
/// when the query has no usable tokens).
pub fn token_overlap(query_key: &str, candidate_key: &str) -> f64 {
    let query_tokens = tokens(query_key);
    if query_tokens.is_empty() {
        return 0.0;
    }
    let candidate_tokens = tokens(candidate_key);

    let matched = query_tokens
        .iter()
        .filter(|t| token_matches(t, candidate_key, &candidate_tokens))
        .count();

    matched as f64 / query_tokens.len() as f64
}

fn tokens(key: &str) -> Vec<&str> {
    key.split('_').filter(|t| t.len() >= MIN_TOKEN_LEN).collect()
}

fn token_matches(token: &str, candidate_key: &str, candidate_tokens: &[&str]) -> bool {
    if candidate_key.contains(token) {
        return true;
    }
    candidate_tokens
        .iter()
        .any(|ct| token.contains(ct) || edit_distance(token, ct) <= TOKEN_EDIT_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("anubis", "anubis"), 0);
    }

    #[test]
    fn distance_from_empty_is_length() {
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn classic_pair() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn symmetric() {
        for (a, b) in [
            ("hero", "heroes"),
            ("dracula", "dracul"),
            ("captain_nemo", "captain_memo"),
            ("", "tarzan"),
        ] {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn identical_token_sets_score_full() {
        assert_eq!(token_overlap("captain_nemo", "captain_nemo"), 1.0);
    }

    #[test]
    fn short_tokens_are_discarded() {
        // "of" and "la" fall below the token length floor
        assert_eq!(token_overlap("count_of_monte_cristo", "count_monte_cristo"), 1.0);
    }

    #[test]
    fn near_token_matches_within_distance() {
        // "nemo" vs "memo" is distance 1
        assert!(token_overlap("captain_nemo", "captain_memo") >= TOKEN_OVERLAP_THRESHOLD);
    }

    #[test]
    fn disjoint_tokens_score_zero() {
        assert_eq!(token_overlap("sherlock_holmes", "dejah_thoris"), 0.0);
    }

    #[test]
    fn query_without_usable_tokens_scores_zero() {
        assert_eq!(token_overlap("a_b", "anything"), 0.0);
        assert_eq!(token_overlap("", "anything"), 0.0);
    }

    #[test]
    fn partial_overlap_is_fractional() {
        // one of two usable tokens matches
        let score = token_overlap("tarzan_triumphant", "tarzan_untamed");
        assert!(score > 0.4 && score < 0.6);
    }
}
