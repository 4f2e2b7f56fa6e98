use std::collections::HashSet;

/// Description similarity in [0, 1]: mean of token-set overlap and a
/// longest-matching-blocks character ratio.
///
/// Token overlap alone over-penalizes descriptions that differ only in
/// boilerplate qualifiers (HS codes, pack sizes); the character ratio
/// alone over-penalizes reordered wording. Averaging tolerates both.
pub fn score(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let overlap = token_overlap(&a_lower, &b_lower);
    let char_sim = sequence_ratio(&a_lower, &b_lower);
    (overlap + char_sim) / 2.0
}

/// Jaccard similarity of the two strings' unique word-token sets.
/// An empty union scores 0.0.
fn token_overlap(a: &str, b: &str) -> f64 {
    let a_tokens = tokens(a);
    let b_tokens = tokens(b);
    let union = a_tokens.union(&b_tokens).count();
    if union == 0 {
        return 0.0;
    }
    let overlap = a_tokens.intersection(&b_tokens).count();
    overlap as f64 / union as f64
}

/// Maximal runs of alphanumeric/underscore characters, already lowercased
/// by the caller.
fn tokens(s: &str) -> HashSet<&str> {
    s.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Sequence-similarity ratio 2·M / T, where M is the total length of the
/// recursively chosen longest common blocks and T the combined length of
/// both strings. Two empty strings rate 1.0 (degenerate T = 0 case).
fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&a_chars, &b_chars);
    2.0 * matches as f64 / total as f64
}

/// Total matched characters: take the longest common block (earliest
/// position on ties), then recurse into the unmatched flanks. Blocks never
/// cross, so the result is a valid monotone alignment.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..a_start], &b[..b_start])
        + matching_chars(&a[a_start + len..], &b[b_start + len..])
}

/// Longest common contiguous block of `a` and `b` as (start_a, start_b,
/// len), preferring the earliest start in `a`, then in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    if a.is_empty() || b.is_empty() {
        return best;
    }
    // run_len[j]: length of the common suffix ending at a[i], b[j - 1]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                curr[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            } else {
                curr[j + 1] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}
