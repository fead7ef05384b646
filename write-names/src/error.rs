//! Errors that occur during writing

use crate::validate::ValidationReport;

/// An error occurred while writing a table
#[derive(Clone, Debug)]
pub enum Error {
    /// The table failed pre-serialization validation
    ValidationFailed(ValidationReport),
    /// A resolved offset did not fit in its 16-bit field
    OffsetOverflow,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ValidationFailed(report) => report.fmt(f),
            Error::OffsetOverflow => write!(f, "An offset overflowed its 16-bit field"),
        }
    }
}

impl std::error::Error for Error {}
