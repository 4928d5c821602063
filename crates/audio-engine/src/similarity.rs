//! Character-level sequence similarity.
//!
//! Implements the Ratcliff/Obershelp "gestalt pattern matching" ratio: find
//! the longest common block, recurse on the pieces either side of it, and
//! score `2 * matched / (len(a) + len(b))`. This rewards long shared runs,
//! which suits device names with transposed or doubled letters better than
//! plain edit distance.

use std::collections::HashMap;

/// Sequences at least this long get the "popular element" heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity of `a` and `b` in `[0.0, 1.0]`.
///
/// `a` is the candidate and `b` the needle; the ratio is not strictly
/// symmetric when `b` is long enough to trigger the popular-element
/// heuristic. Two empty strings are identical (`1.0`).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = Matcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Longest-block matcher over two character sequences.
struct Matcher<'a> {
    /// First sequence.
    a: &'a [char],
    /// Second sequence.
    b: &'a [char],
    /// Positions of each usable character of `b`.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> Matcher<'a> {
    /// Index `b`, dropping characters that are too common in long sequences
    /// to be useful anchors.
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns `(i, j, k)` with `a[i..i+k] == b[j..j+k]`. Among maximal blocks
    /// the one starting earliest in `a` wins, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestk) = (alo, blo, 0);
        // j2len[j] = length of the match ending at a[i-1], b[j].
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
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
                    if k > bestk {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestk = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular characters were left out of the index; grow the block
        // across equal neighbours so they still count.
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestk += 1;
        }
        while besti + bestk < ahi && bestj + bestk < bhi && self.a[besti + bestk] == self.b[bestj + bestk]
        {
            bestk += 1;
        }
        (besti, bestj, bestk)
    }

    /// Total length of all matching blocks.
    fn matched_len(&self) -> usize {
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
