//! Ratcliff/Obershelp sequence similarity over characters.
//!
//! `ratio(a, b)` is `2 * M / (len(a) + len(b))` where `M` is the number of
//! characters in the matching blocks found by recursively taking the longest
//! common run. `b` is the indexed side: when it has 200 or more characters,
//! characters occurring in more than 1% of it (plus one) are not used to seed
//! a match, although matches may still extend across them.

use ahash::AHashMap;

pub const DEFAULT_CLOSE_CUTOFF: f64 = 0.6;

const AUTOJUNK_MIN_LEN: usize = 200;

struct Matcher {
    a: Vec<char>,
    b: Vec<char>,
    b2j: AHashMap<char, Vec<usize>>,
}

impl Matcher {
    fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut b2j: AHashMap<char, Vec<usize>> = AHashMap::new();
        for (j, ch) in b.iter().enumerate() {
            b2j.entry(*ch).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);
        let mut j2len: AHashMap<usize, usize> = AHashMap::new();
        for i in alo..ahi {
            let mut next: AHashMap<usize, usize> = AHashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }
        (best_i, best_j, best_size)
    }

    fn matched_chars(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }
}

/// Similarity of `a` and `b` in `0.0..=1.0`; two empty strings score 1.0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let matcher = Matcher::new(a, b);
    let total = matcher.a.len() + matcher.b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matcher.matched_chars() as f64 / total as f64
}

/// Cheap upper bound on [`ratio`] from the lengths alone.
fn length_bound(a: &str, b: &str) -> f64 {
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la + lb == 0 {
        return 1.0;
    }
    2.0 * la.min(lb) as f64 / (la + lb) as f64
}

/// Whether `query` is a close match for `candidate` at `cutoff`.
pub fn is_close(query: &str, candidate: &str, cutoff: f64) -> bool {
    length_bound(query, candidate) >= cutoff && ratio(query, candidate) >= cutoff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(ratio("Rupert", "Rupert"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn prefix_ratio_counts_shared_run() {
        // 6 shared characters over 6 + 14
        assert_eq!(ratio("Rupert", "Rupert Everett"), 0.6);
        assert!(is_close("Rupert", "Rupert Everett", DEFAULT_CLOSE_CUTOFF));
        assert!(is_close("Rupert", "John Rupert", DEFAULT_CLOSE_CUTOFF));
        assert!(!is_close("Rupert", "1924-01-01", DEFAULT_CLOSE_CUTOFF));
    }

    #[test]
    fn recursion_collects_blocks_on_both_sides() {
        // "ab" then "d" match around the differing middle character
        assert_eq!(ratio("abcd", "abxd"), 0.75);
    }

    #[test]
    fn popular_characters_still_extend_matches() {
        let candidate = "a".repeat(250);
        assert_eq!(ratio("a", &candidate), 2.0 / 251.0);
    }

    #[test]
    fn length_bound_rejects_short_queries() {
        assert!(!is_close("ab", "abcdefghij", DEFAULT_CLOSE_CUTOFF));
    }
}
