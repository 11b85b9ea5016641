// model = "claude-opus-4-5"
// created = "2026-07-29"
// modified = "2026-07-29"
// driver = "Isaac Clayton"

//! Operational errors reported to callers.
//!
//! Only recoverable conditions live here. Contract violations - calling the
//! allocator with misordered bounds, deleting a sentinel - are programming
//! errors and are checked with debug assertions instead.

use thiserror::Error;

/// Errors returned by position construction and allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A position is already at maximum depth, or the digit does not fit
    /// the bit width of its depth.
    #[error("position overflow: maximum depth reached or digit out of range")]
    PositionOverflow,

    /// No free identifier exists between the given bounds at any depth.
    /// The document cannot accept more inserts between these neighbors.
    #[error("identifier space exhausted between the given positions")]
    SpaceExhausted,
}
