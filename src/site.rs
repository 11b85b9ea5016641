// model = "claude-opus-4-5"
// created = "2026-07-29"
// modified = "2026-07-30"
// driver = "Isaac Clayton"

//! Replica site identifiers.
//!
//! Every replica picks a 64-bit identifier at startup from the operating
//! system's CSPRNG. Site identifiers are interleaved into positions as
//! tiebreakers: two replicas allocating between the same neighbors produce
//! distinct positions because the digit they introduce carries their own
//! site. Collisions are tolerated (ordering degenerates to digit order) but
//! must be rare, hence the cryptographic source.

use rand_core::OsRng;
use rand_core::RngCore;
use serde::Deserialize;
use serde::Serialize;

/// A replica identifier, 64 opaque bits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SiteId(pub u64);

impl SiteId {
    /// The zero site, reserved for sentinels and padding.
    pub const ZERO: SiteId = SiteId(0);

    /// Generate a random site identifier.
    pub fn generate() -> SiteId {
        let mut buf = [0u8; 8];
        OsRng.fill_bytes(&mut buf);
        return SiteId(u64::from_be_bytes(buf));
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{:X}", self.0);
    }
}

impl std::fmt::Debug for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "SiteId(@{:X})", self.0);
    }
}
