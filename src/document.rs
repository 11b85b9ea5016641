// model = "claude-opus-4-5"
// created = "2026-07-31"
// modified = "2026-08-01"
// driver = "Isaac Clayton"

//! An ordered collection of atoms addressed by position.
//!
//! A document owns a replica site identifier, an allocator, and a skip
//! list of atoms framed by two unremovable sentinels. The sentinels
//! guarantee that every atom - including the first and last - has a
//! well-defined left and right neighbor to allocate between.
//!
//! Two replicas that end up holding the same set of `(position, data)`
//! atoms iterate them in the same order: order lives entirely in the
//! positions, so merging is set union and needs no conflict resolution.

use tracing::debug;

use crate::alloc::Allocator;
use crate::error::Error;
use crate::position::Position;
use crate::site::SiteId;
use crate::skip_list::SkipList;

/// A single unit of document content: an opaque string tagged with the
/// position that orders it.
#[derive(Clone, Debug)]
pub struct Atom {
    pub pos: Position,
    pub data: String,
}

impl Atom {
    fn new(pos: Position, data: String) -> Atom {
        return Atom { pos, data };
    }

    /// A probe carrying only a position, for lookups and deletes.
    fn probe(pos: Position) -> Atom {
        return Atom::new(pos, String::new());
    }
}

// Atoms order and compare by position alone; the data is payload.
impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        return self.pos == other.pos;
    }
}

impl Eq for Atom {}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        return Some(self.cmp(other));
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        return self.pos.cmp(&other.pos);
    }
}

/// A mutable ordered list of atoms (lines, characters, ...).
pub struct Document {
    site: SiteId,
    atoms: SkipList<Atom>,
    alloc: Allocator,
    head: Position,
    tail: Position,
}

impl Document {
    /// Create an empty document with a freshly generated site identifier.
    pub fn new() -> Document {
        return Document::assemble(SiteId::generate(), Allocator::new());
    }

    /// Create a deterministic document for tests and replays.
    pub fn seeded(site: SiteId, seed: u64) -> Document {
        return Document::assemble(site, Allocator::seeded(seed));
    }

    fn assemble(site: SiteId, alloc: Allocator) -> Document {
        let head = Position::head();
        let tail = Position::tail();

        let mut atoms = SkipList::new();
        atoms.insert(Atom::probe(head.clone()));
        atoms.insert(Atom::probe(tail.clone()));

        return Document { site, atoms, alloc, head, tail };
    }

    /// This replica's site identifier.
    pub fn site(&self) -> SiteId {
        return self.site;
    }

    /// Number of user atoms, sentinels excluded.
    pub fn len(&self) -> usize {
        return self.atoms.len() - 2;
    }

    /// True when the document holds no user atoms.
    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    /// All atom data in position order.
    pub fn data(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len());
        self.each(|_, _, data| out.push(data.to_string()));
        return out;
    }

    /// The `index`-th user atom. Panics when out of bounds.
    pub fn at(&self, index: usize) -> (&Position, &str) {
        assert!(index < self.len(), "index {} out of bounds (len {})", index, self.len());
        let atom = self.atoms.get(index + 1).expect("bounds checked");
        return (&atom.pos, &atom.data);
    }

    /// Add an atom. Returns false, leaving the document unchanged, if the
    /// position is already present.
    pub fn insert(&mut self, pos: Position, data: String) -> bool {
        let inserted = self.atoms.insert(Atom::new(pos, data));
        if !inserted {
            debug!("insert skipped: position already present");
        }
        return inserted;
    }

    /// Remove the atom at `pos`. Returns true iff one was removed.
    /// Sentinels are unremovable; attempting it is a programming error.
    pub fn delete(&mut self, pos: &Position) -> bool {
        if *pos == self.head || *pos == self.tail {
            debug_assert!(false, "cannot delete a sentinel");
            return false;
        }
        return self.atoms.remove(&Atom::probe(pos.clone()));
    }

    /// Iterate user atoms in order, sentinels skipped.
    pub fn each(&self, mut cb: impl FnMut(usize, &Position, &str)) {
        let count = self.len();
        for (index, atom) in self.atoms.iter().skip(1).take(count).enumerate() {
            cb(index, &atom.pos, &atom.data);
        }
    }

    /// Return `count` strictly increasing positions, all strictly between
    /// the atoms flanking `index`. Sentinels count as flanks: `index == 0`
    /// allocates after the head sentinel, `index == len()` before the
    /// tail.
    pub fn allocate(
        &mut self,
        index: usize,
        count: usize,
        site: SiteId,
    ) -> Result<Vec<Position>, Error> {
        assert!(index <= self.len(), "index {} out of bounds (len {})", index, self.len());

        let mut left = self.atoms.get(index).expect("bounds checked").pos.clone();
        let right = self.atoms.get(index + 1).expect("bounds checked").pos.clone();

        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let mut pos = Position::new();
            self.alloc.call(&mut pos, &left, &right, site)?;
            left = pos.clone();
            out.push(pos);
        }
        return Ok(out);
    }
}

impl Default for Document {
    fn default() -> Self {
        return Self::new();
    }
}
