//! Comment-preserving patches for document front matter.
//!
//! A [`SourceRecord`] is one document: its header block (as an editable
//! [`matter_yaml::Document`]), the decoded plain view of the header, and the
//! body text. [`apply_patch`] upserts and deletes top-level header keys
//! while leaving every other byte of the header as the author wrote it.
//!
//! # Example
//!
//! ```rust
//! use matter_patch::{EmitOptions, PatchSet, SourceRecord};
//!
//! let mut record = SourceRecord::parse("---\n# cover slide\ntitle: Draft\n---\n# Hello\n").unwrap();
//!
//! let mut patch = PatchSet::new();
//! patch.set("title", "Final").set("theme", "seriph");
//! record.apply_patch(&patch).unwrap();
//!
//! assert_eq!(
//!     record.render(&EmitOptions::default()).unwrap(),
//!     "---\n# cover slide\ntitle: Final\ntheme: seriph\n---\n# Hello\n",
//! );
//! ```

mod error;
mod patch;
mod record;

pub use error::{Error, Result};
pub use patch::{apply_patch, PatchSet};
pub use record::{BlockKind, HeaderStyle, SourceRecord};

// Re-export for convenience
pub use matter_yaml::EmitOptions;
