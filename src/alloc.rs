// model = "claude-opus-4-5"
// created = "2026-07-30"
// modified = "2026-08-01"
// driver = "Isaac Clayton"

//! The LSEQ allocator: mint a position strictly between two others.
//!
//! The algorithm, per call:
//!
//! 1. **Depth search.** Project both bounds to prefixes of depth 1, 2, ...
//!    and stop at the first depth whose digit stacks leave at least one
//!    free identifier between them.
//! 2. **Offset.** Draw a uniform offset in `1..=min(BOUNDARY, interval)`.
//!    Capping at [`BOUNDARY`] leaves room for later inserts on the same
//!    side instead of bisecting the interval.
//! 3. **Strategy.** At each depth, stick with the memoized boundary end:
//!    add the offset to the left prefix, or subtract it from the right.
//! 4. **Site interleaving.** Digits shared with a bound keep that bound's
//!    site; the genuinely new digit carries the caller's site. Two
//!    replicas allocating between the same atoms therefore still produce
//!    distinct, totally-ordered positions.
//!
//! The allocator is not thread safe: it owns its PRNG, its strategy memo,
//! and scratch buffers reused across calls. Every document gets its own.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::trace;

use crate::error::Error;
use crate::position::MAX_DEPTH;
use crate::position::Position;
use crate::site::SiteId;
use crate::strategy::Strategy;
use crate::strategy::StrategyMap;

/// How many free identifiers to leave before or after the first allocation
/// at a new tree depth.
pub const BOUNDARY: u64 = 10;

/// Allocates positions between existing ones.
pub struct Allocator {
    strategies: StrategyMap,
    rng: StdRng,
    // scratch prefixes reused across calls
    lt: Position,
    rt: Position,
}

impl Allocator {
    /// Create an allocator seeded from entropy.
    pub fn new() -> Allocator {
        return Allocator::from_rng(StdRng::from_entropy());
    }

    /// Create a deterministic allocator for tests and replays.
    pub fn seeded(seed: u64) -> Allocator {
        return Allocator::from_rng(StdRng::seed_from_u64(seed));
    }

    fn from_rng(rng: StdRng) -> Allocator {
        return Allocator {
            strategies: StrategyMap::new(),
            rng,
            lt: Position::new(),
            rt: Position::new(),
        };
    }

    /// Set `out` to a position strictly between `left` and `right`.
    ///
    /// Requires `left.is_before(right)`; violating that is a programming
    /// error, checked in debug builds. Returns [`Error::SpaceExhausted`]
    /// when no depth up to [`MAX_DEPTH`] has a free identifier between the
    /// bounds.
    pub fn call(
        &mut self,
        out: &mut Position,
        left: &Position,
        right: &Position,
        site: SiteId,
    ) -> Result<(), Error> {
        debug_assert!(left.is_before(right), "arguments not in order: {} {}", left, right);

        // find the shallowest depth with room between the prefixes
        let mut found = None;
        for depth in 1..MAX_DEPTH {
            self.lt.set_prefix(left, depth);
            self.rt.set_prefix(right, depth);
            let interval = self.rt.interval(&self.lt);
            trace!(depth, interval, "probing depth");
            if interval >= 1 {
                found = Some((depth, interval));
                break;
            }
        }
        let (depth, interval) = match found {
            Some(found) => found,
            None => return Err(Error::SpaceExhausted),
        };

        // place the new digits near one end of the free interval
        let step = BOUNDARY.min(interval);
        let offset = self.rng.gen_range(1..=step);
        match self.strategies.get(depth, &mut self.rng) {
            Strategy::BoundaryLo => {
                out.set_prefix(left, depth);
                out.digits_add(offset);
            }
            Strategy::BoundaryHi => {
                out.set_prefix(right, depth);
                out.digits_sub(offset);
            }
        }

        // Attribute each digit. Comparison is against the original bounds,
        // not the prefixes: past their length both read as digit zero with
        // the zero site, which is exactly the padding order assumes.
        for d in 0..out.len() {
            let digit = out.digit_at(d);
            if digit == left.digit_at(d) {
                out.set_site(d, left.site_at(d));
            } else if digit == right.digit_at(d) {
                out.set_site(d, right.site_at(d));
            } else {
                out.set_site(d, site);
            }
        }

        trace!(%out, depth, offset, "allocated");
        debug_assert!(
            left.is_before(out) && out.is_before(right),
            "allocated position out of order: {} {} {}",
            left,
            out,
            right,
        );
        return Ok(());
    }
}

impl Default for Allocator {
    fn default() -> Self {
        return Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_position(digits: &[u32]) -> Position {
        let mut out = Position::new();
        for &digit in digits {
            out = out.append(digit, SiteId(0xDEADBEEF)).unwrap();
        }
        return out;
    }

    #[test]
    fn inserts_between_noncontiguous_positions_of_same_length() {
        let p1 = make_position(&[21, 42]);
        let p2 = make_position(&[21, 44]);
        let mut alloc = Allocator::new();
        let mut out = Position::new();

        alloc.call(&mut out, &p1, &p2, SiteId(0xF00F00F0)).unwrap();

        // interval of 1: both strategies land on 43, the shared root digit
        // keeps the left bound's site, the new digit takes the caller's
        assert_eq!(format!("{}", out), "<21 @DEADBEEF, 43 @F00F00F0>");
    }

    #[test]
    fn adds_a_level_between_contiguous_positions() {
        let p1 = make_position(&[16, 30]);
        let p2 = make_position(&[16, 31]);
        let mut alloc = Allocator::new();
        let mut out = Position::new();

        alloc.call(&mut out, &p1, &p2, SiteId(0xF00F00F0)).unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(out.digit_at(0), 16);
        assert_eq!(out.digit_at(1), 30);
        assert_eq!(out.site_at(2), SiteId(0xF00F00F0));
    }

    #[test]
    fn allocates_between_the_sentinels() {
        let head = Position::head();
        let tail = Position::tail();
        let mut alloc = Allocator::seeded(7);
        let mut out = Position::new();

        alloc.call(&mut out, &head, &tail, SiteId(0xAB)).unwrap();

        assert!(head.is_before(&out));
        assert!(out.is_before(&tail));
        assert_eq!(out.len(), 1);
        assert!(out.digit_at(0) >= 1 && out.digit_at(0) <= 30);
    }

    #[test]
    fn offsets_stay_within_the_boundary() {
        // A wide-open interval: allocation must stay within BOUNDARY of
        // one end rather than landing somewhere in the middle.
        let head = Position::head();
        let tail = Position::tail();
        for seed in 0..32 {
            let mut alloc = Allocator::seeded(seed);
            let mut out = Position::new();
            alloc.call(&mut out, &head, &tail, SiteId(0xAB)).unwrap();
            let digit = out.digit_at(0) as u64;
            let lo = digit; // distance above the head digit 0
            let hi = 31 - digit; // distance below the tail digit 31
            assert!(
                lo <= BOUNDARY || hi <= BOUNDARY,
                "digit {} is not near either bound",
                digit
            );
        }
    }

    #[test]
    fn strict_between_over_random_bounds() {
        let mut alloc = Allocator::seeded(42);
        let mut digit_rng = <StdRng as SeedableRng>::seed_from_u64(1337);

        for _ in 0..500 {
            let len = digit_rng.gen_range(1..=7usize);
            let mut p1 = Position::new();
            let mut p2 = Position::new();
            for depth in 0..len {
                let max = crate::position::max_digit_at_depth(depth);
                p1 = p1.append(digit_rng.gen_range(0..=max), SiteId(0xFF)).unwrap();
                p2 = p2.append(digit_rng.gen_range(0..=max), SiteId(0xFF)).unwrap();
            }
            if p2.is_before(&p1) {
                std::mem::swap(&mut p1, &mut p2);
            }
            if !p1.is_before(&p2) {
                continue; // equal draw, roll again
            }

            let mut out = Position::new();
            alloc.call(&mut out, &p1, &p2, SiteId(0xF00F00F0)).unwrap();
            assert!(p1.is_before(&out), "{} not before {}", p1, out);
            assert!(out.is_before(&p2), "{} not before {}", out, p2);
        }
    }

    #[test]
    fn reports_exhaustion_when_no_depth_has_room() {
        // Bounds that differ only in the deepest probed digit, by one:
        // every prefix depth has interval zero.
        let mut left = Position::new();
        for _ in 0..MAX_DEPTH - 1 {
            left = left.append(0, SiteId(1)).unwrap();
        }
        let mut right = left.prefix(MAX_DEPTH - 2);
        right = right.append(1, SiteId(1)).unwrap();

        assert!(left.is_before(&right));

        let mut alloc = Allocator::seeded(3);
        let mut out = Position::new();
        let result = alloc.call(&mut out, &left, &right, SiteId(0xAB));
        assert_eq!(result, Err(Error::SpaceExhausted));
    }

    #[test]
    fn interleaves_sites_per_digit() {
        let p1 = make_position(&[21, 42]);
        let p2 = make_position(&[21, 44]);
        let mut alloc = Allocator::seeded(11);
        let mut out = Position::new();
        alloc.call(&mut out, &p1, &p2, SiteId(0xF00F00F0)).unwrap();

        for d in 0..out.len() {
            let digit = out.digit_at(d);
            let expected = if digit == p1.digit_at(d) {
                p1.site_at(d)
            } else if digit == p2.digit_at(d) {
                p2.site_at(d)
            } else {
                SiteId(0xF00F00F0)
            };
            assert_eq!(out.site_at(d), expected, "depth {}", d);
        }
    }
}
