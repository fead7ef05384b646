//! The pre-serialization validation pass

use std::fmt::{self, Display};

/// Pre-serialization validation of tables.
///
/// The naming table stores its array and string lengths in 16-bit fields.
/// Requirements like these are awkward to encode in the type system, and are
/// enforced via a validation pass instead.
pub trait Validate {
    /// Ensure that this table is well-formed, reporting any errors.
    fn validate(&self) -> Result<(), ValidationReport> {
        let mut ctx = ValidationCtx::default();
        self.validate_impl(&mut ctx);
        if ctx.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { errors: ctx.errors })
        }
    }

    /// Validate this table, reporting any errors into `ctx`.
    fn validate_impl(&self, ctx: &mut ValidationCtx);
}

/// A context for collecting validation errors.
///
/// This is responsible for tracking the position in the tree at which a
/// given error is reported.
#[derive(Clone, Debug, Default)]
pub struct ValidationCtx {
    location: Vec<LocationElem>,
    errors: Vec<ValidationError>,
}

#[derive(Clone, Debug)]
enum LocationElem {
    Table(&'static str),
    Field(&'static str),
    Index(usize),
}

#[derive(Clone, Debug)]
struct ValidationError {
    message: String,
    location: Vec<LocationElem>,
}

/// One or more validation errors.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationCtx {
    /// Run the provided closure in the context of a new table.
    pub fn in_table(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Table(name), f);
    }

    /// Run the provided closure in the context of a new field.
    pub fn in_field(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Field(name), f);
    }

    /// Run the provided closure in the context of an array item.
    pub fn in_array_item(&mut self, index: usize, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Index(index), f);
    }

    /// Report an error at the current location.
    pub fn report(&mut self, message: impl Into<String>) {
        self.errors.push(ValidationError {
            message: message.into(),
            location: self.location.clone(),
        });
    }

    fn with_elem(&mut self, elem: LocationElem, f: impl FnOnce(&mut ValidationCtx)) {
        self.location.push(elem);
        f(self);
        self.location.pop();
    }
}

impl ValidationReport {
    /// The number of errors in the report.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} validation errors:", self.errors.len())?;
        for error in &self.errors {
            for (i, elem) in error.location.iter().enumerate() {
                match elem {
                    LocationElem::Table(name) => {
                        if i != 0 {
                            f.write_str("/")?;
                        }
                        f.write_str(name)?;
                    }
                    LocationElem::Field(name) => write!(f, "/{name}")?,
                    LocationElem::Index(idx) => write!(f, "[{idx}]")?,
                }
            }
            writeln!(f, ": {}", error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
