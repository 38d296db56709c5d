//! Fuzzy matching utilities for OCR text
//!
//! Provides a block-matching similarity ratio (Ratcliff/Obershelp style):
//! the longest common run of characters is matched first, then the same
//! procedure is applied to the unmatched text on either side of it.

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// A run of identical characters: `a[a..a + size] == b[b..b + size]`
///
/// Offsets are character indices, not byte indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Calculate similarity score between two strings
///
/// Returns `2 * M / T` where `T` is the combined character count and `M` the
/// number of characters covered by matching blocks. Two empty strings are
/// identical (1.0). The arguments are put in a canonical order first so the
/// score does not depend on which side a string is passed on.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (a, b) = canonical_pair(a, b);
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched: usize = blocks(&a, &b).iter().map(|block| block.size).sum();
    2.0 * matched as f64 / total as f64
}

/// Matching blocks between `a` and `b`, ordered by position
pub fn matching_blocks(a: &str, b: &str) -> Vec<MatchingBlock> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    blocks(&a, &b)
}

/// Minimum score a candidate needs to count as a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    /// Score must be strictly greater than the value
    Above(f64),
    /// Score may equal the value
    AtLeast(f64),
}

impl Cutoff {
    pub fn admits(self, score: f64) -> bool {
        match self {
            Cutoff::Above(min) => score > min,
            Cutoff::AtLeast(min) => score >= min,
        }
    }
}

/// Return the first candidate whose score passes `cutoff`
///
/// Candidates are visited in order and scanning stops at the first hit.
pub fn find_first_match<I, S>(
    search_term: &str,
    candidates: I,
    cutoff: Cutoff,
) -> Option<FuzzyMatch>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates.into_iter().find_map(|candidate| {
        let candidate = candidate.as_ref();
        let score = similarity(search_term, candidate);
        cutoff.admits(score).then(|| FuzzyMatch {
            value: candidate.to_string(),
            score,
        })
    })
}

fn canonical_pair<'s>(a: &'s str, b: &'s str) -> (&'s str, &'s str) {
    let key_a = (a.chars().count(), a);
    let key_b = (b.chars().count(), b);
    if key_a <= key_b {
        (a, b)
    } else {
        (b, a)
    }
}

fn blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut found = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, b, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }
        if alo < block.a && blo < block.b {
            pending.push((alo, block.a, blo, block.b));
        }
        if block.a + block.size < ahi && block.b + block.size < bhi {
            pending.push((block.a + block.size, ahi, block.b + block.size, bhi));
        }
        found.push(block);
    }

    found.sort_unstable_by_key(|block| (block.a, block.b));
    found
}

/// Longest common run inside `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the earliest start in `a`, then the earliest start in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchingBlock {
    let mut best = MatchingBlock {
        a: alo,
        b: blo,
        size: 0,
    };

    // curr[j + 1 - blo]: length of the common run ending at a[i], b[j]
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j + 1 - blo;
            if a[i] == b[j] {
                let k = prev[slot - 1] + 1;
                curr[slot] = k;
                if k > best.size {
                    best = MatchingBlock {
                        a: i + 1 - k,
                        b: j + 1 - k,
                        size: k,
                    };
                }
            } else {
                curr[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
