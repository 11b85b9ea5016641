// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-01"
// driver = "Isaac Clayton"

//! Sequence diffing with longest-common-subsequence opcodes.
//!
//! `opcodes(a, b)` describes how to turn `a` into `b` as a list of tagged
//! spans: `Equal` spans to keep, `Delete` spans to drop from `a`, `Insert`
//! spans to take from `b`, and `Replace` spans that do both. Spans are
//! contiguous and cover both sequences end to end.
//!
//! The matcher finds the longest block of equal elements, then recurses
//! on the pieces before and after it - the classic difflib construction,
//! minus the junk heuristics (line diffs of documents do not need them).

use std::collections::HashMap;
use std::hash::Hash;

/// What to do with one pair of spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// `a[i1..i2]` equals `b[j1..j2]`; keep it.
    Equal,
    /// Drop `a[i1..i2]`.
    Delete,
    /// Take `b[j1..j2]`.
    Insert,
    /// Drop `a[i1..i2]`, take `b[j1..j2]`.
    Replace,
}

/// One tagged pair of spans. `i` indices address `a`, `j` indices `b`;
/// all ranges are half-open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpCode {
    pub tag: Tag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

/// The longest block of equal elements within `a[alo..ahi]` and
/// `b[blo..bhi]`, leftmost on ties. Returns `(i, j, size)`.
fn longest_match<T: Eq + Hash>(
    a: &[T],
    b2j: &HashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);

    // j2len[j] = length of the longest match ending at a[i], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_j2len = HashMap::new();
        if let Some(js) = b2j.get(&a[i]) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let len = match j.checked_sub(1) {
                    Some(prev) => j2len.get(&prev).copied().unwrap_or(0) + 1,
                    None => 1,
                };
                next_j2len.insert(j, len);
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        j2len = next_j2len;
    }

    return best;
}

/// All maximal equal blocks of `a` and `b`, in order, with a zero-length
/// terminator at the end of both sequences.
fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<(usize, usize, usize)> {
    let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, item) in b.iter().enumerate() {
        b2j.entry(item).or_default().push(j);
    }

    let mut queue = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            blocks.push((i, j, size));
            queue.push((alo, i, blo, j));
            queue.push((i + size, ahi, j + size, bhi));
        }
    }
    blocks.sort_unstable();

    // coalesce adjacent blocks so opcode derivation sees maximal runs
    let mut merged: Vec<(usize, usize, usize)> = Vec::new();
    for (i, j, size) in blocks {
        match merged.last_mut() {
            Some(last) if last.0 + last.2 == i && last.1 + last.2 == j => {
                last.2 += size;
            }
            _ => merged.push((i, j, size)),
        }
    }
    merged.push((a.len(), b.len(), 0));
    return merged;
}

/// Diff `a` against `b` as a list of opcodes covering both sequences.
pub fn opcodes<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<OpCode> {
    let mut out = Vec::new();
    let mut i = 0;
    let mut j = 0;
    for (ai, bj, size) in matching_blocks(a, b) {
        let tag = match (i < ai, j < bj) {
            (true, true) => Some(Tag::Replace),
            (true, false) => Some(Tag::Delete),
            (false, true) => Some(Tag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            out.push(OpCode { tag, i1: i, i2: ai, j1: j, j2: bj });
        }
        i = ai + size;
        j = bj + size;
        if size > 0 {
            out.push(OpCode { tag: Tag::Equal, i1: ai, i2: i, j1: bj, j2: j });
        }
    }
    return out;
}
