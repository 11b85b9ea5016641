// model = "claude-opus-4-5"
// created = "2026-07-29"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! Lseq - replicated ordered sequences with LSEQ position identifiers.
//!
//! Every atom in a document carries an immutable, variable-base position.
//! Any two replicas can independently mint a position strictly between
//! two known ones, and the total order on positions reconstructs the same
//! sequence everywhere - no coordination, no conflict resolution, merging
//! is set union.
//!
//! # Quick Start
//!
//! ```
//! use lseq::document::Document;
//! use lseq::patch::Patch;
//!
//! // Create a replica-local document.
//! let mut doc = Document::new();
//! let site = doc.site();
//!
//! // Edit by patching in the lines we want.
//! let target = vec!["hello".to_string(), "world".to_string()];
//! let patch = Patch::new(&mut doc, site, &target).unwrap();
//! patch.apply(&mut doc);
//!
//! assert_eq!(doc.data(), target);
//! ```
//!
//! Lower-level edits allocate positions directly:
//!
//! ```
//! use lseq::document::Document;
//!
//! let mut doc = Document::new();
//! let site = doc.site();
//!
//! let positions = doc.allocate(0, 2, site).unwrap();
//! doc.insert(positions[0].clone(), "first".to_string());
//! doc.insert(positions[1].clone(), "second".to_string());
//!
//! assert_eq!(doc.data(), vec!["first", "second"]);
//! ```

pub mod alloc;
pub mod diff;
pub mod document;
pub mod error;
pub mod patch;
pub mod position;
pub mod site;
pub mod skip_list;
pub mod strategy;
