//! Traits for interpreting font data

use crate::font_data::FontData;

/// A type that can be read from raw table data.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when reading font data
///
/// The naming table performs no structural validation of its own: the only
/// way a read can fail is by running past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// A read went past the end of the buffer
    OutOfBounds,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "A read was out of bounds"),
        }
    }
}

impl std::error::Error for ReadError {}
