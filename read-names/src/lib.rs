//! Reading the OpenType naming table
//!
//! This crate provides memory safe parsing of the [`name`][spec] table: the
//! part of a font that stores human-readable strings (copyright, family
//! name, version, and so on) keyed by a name identifier and a
//! platform/encoding/language triple.
//!
//! Decoding is deliberately narrow: only Windows/Unicode-BMP/US-English
//! records are interpreted, and strings are decoded one code unit at a time
//! (no surrogate-pair composition). See [`tables::name`] for details.
//!
//! The companion `write-names` crate builds and serializes naming tables.
//!
//! # Example
//!
//! ```
//! use read_names::{tables::name::Name, NameId};
//!
//! fn family_name(table_bytes: &[u8]) -> Option<String> {
//!     let name = Name::parse(table_bytes, 0).ok()?;
//!     name.get(NameId::FAMILY_NAME).map(str::to_owned)
//! }
//! ```
//!
//! [spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/name

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod name_id;
mod raw;
mod read;
pub mod tables;

pub use font_data::{Cursor, FontData};
pub use name_id::NameId;
pub use raw::Scalar;
pub use read::{FontRead, ReadError};
