//! Building and writing the OpenType naming table
//!
//! This crate is the companion to `read-names`. Writing is a two-phase
//! affair: you construct an owned [`tables::name::Name`] describing the
//! records to emit, and [`dump_table`] later serializes it, computing the
//! record count and storage offset and resolving each record's string
//! offset once the final layout is known. The builder side never deals in
//! byte offsets.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use write_names::{dump_table, read_names::NameId, tables::name::Name};
//!
//! let mut names = BTreeMap::new();
//! names.insert(NameId::FAMILY_NAME, "Example Sans".to_string());
//! names.insert(NameId::VERSION_STRING, "Version 1.0".to_string());
//! let bytes = dump_table(&Name::from_names(&names)).unwrap();
//! # assert!(!bytes.is_empty());
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
pub mod tables;
pub mod validate;
mod write;

pub use error::Error;
pub use validate::Validate;
pub use write::{dump_table, FontWrite, TableWriter};

/// Public re-export of the read-names crate.
pub use read_names;
