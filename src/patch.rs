// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! Patches: translate a target line array into position-addressed edits.
//!
//! A patch is built against a document's current content and records the
//! deletes and inserts that turn it into the target, with every insert
//! bound to a freshly allocated position. Items address atoms purely by
//! position, so a patch built on one replica can be applied to another
//! that has since diverged - edits land next to the atoms they were made
//! against, which is the point of the exercise.
//!
//! All positions are read and allocated against the state *before* any
//! item is applied: building only records, applying replays.

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::diff;
use crate::diff::Tag;
use crate::document::Document;
use crate::error::Error;
use crate::position::Position;
use crate::site::SiteId;

/// A single recorded edit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchItem {
    /// Add an atom.
    Insert { pos: Position, data: String },
    /// Remove the atom at a position.
    Delete { pos: Position },
}

/// An ordered list of edits turning one document content into another.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    items: Vec<PatchItem>,
}

impl Patch {
    /// Build a patch that transforms `doc.data()` into `target`.
    ///
    /// The document itself is not modified; only its allocator advances.
    /// Inserts inside a replaced span are allocated after the deleted run,
    /// so they land between the old span's neighbors once it is gone.
    pub fn new(doc: &mut Document, site: SiteId, target: &[String]) -> Result<Patch, Error> {
        let current = doc.data();
        let mut items = Vec::new();

        for op in diff::opcodes(&current, target) {
            if matches!(op.tag, Tag::Delete | Tag::Replace) {
                for index in op.i1..op.i2 {
                    let (pos, _) = doc.at(index);
                    items.push(PatchItem::Delete { pos: pos.clone() });
                }
            }
            if matches!(op.tag, Tag::Insert | Tag::Replace) {
                let positions = doc.allocate(op.i2, op.j2 - op.j1, site)?;
                for (pos, data) in positions.into_iter().zip(&target[op.j1..op.j2]) {
                    items.push(PatchItem::Insert { pos, data: data.clone() });
                }
            }
        }

        debug!(items = items.len(), "built patch");
        return Ok(Patch { items });
    }

    /// Number of recorded edits.
    pub fn len(&self) -> usize {
        return self.items.len();
    }

    /// True for a patch with nothing to do.
    pub fn is_empty(&self) -> bool {
        return self.items.is_empty();
    }

    /// The recorded edits, in application order.
    pub fn items(&self) -> &[PatchItem] {
        return &self.items;
    }

    /// Replay the recorded edits, in order, against a document.
    pub fn apply(&self, doc: &mut Document) {
        for item in &self.items {
            match item {
                PatchItem::Insert { pos, data } => {
                    doc.insert(pos.clone(), data.clone());
                }
                PatchItem::Delete { pos } => {
                    doc.delete(pos);
                }
            }
        }
    }
}

impl std::fmt::Display for Patch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            match item {
                PatchItem::Insert { pos, data } => write!(f, "+ {} {}", pos, data)?,
                PatchItem::Delete { pos } => write!(f, "- {}", pos)?,
            }
        }
        return Ok(());
    }
}
