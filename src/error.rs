//! Error types for the report card pipeline.
//!
//! Every variant is terminal: the first one raised ends the run and its
//! `Display` text becomes the `error` field of the error document.

use std::fmt;

use thiserror::Error;

use crate::key::Key;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Foreign-key columns checked during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Course,
    Student,
    Test,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reference::Course => "course",
            Reference::Student => "student",
            Reference::Test => "test",
        })
    }
}

/// Numeric columns checked during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Weights,
    Marks,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quantity::Weights => "weights",
            Quantity::Marks => "marks",
        })
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInvocation,
    SourceNotFound,
    SchemaViolation,
    ReferentialViolation,
    NumericViolation,
    WeightSumViolation,
    Io,
    Internal,
}

/// Errors that can end a report card run
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong parameter count, or a parameter with the wrong extension
    #[error("Invalid arguments")]
    InvalidInvocation,

    /// An input file does not exist
    #[error("Failed to find file {path}")]
    SourceNotFound {
        /// Path that was opened
        path: String,
    },

    /// A required (or id) column is absent from the header
    #[error("Missing columns in file {path}")]
    MissingColumn {
        /// Table file
        path: String,
        /// Column that was expected
        column: String,
    },

    /// A required (or id) column holds a null cell
    #[error("Missing value in {path}")]
    MissingValue {
        /// Table file
        path: String,
        /// Column holding the null
        column: String,
        /// Zero-based data row
        row: usize,
    },

    /// The same id appears on two rows of a keyed table
    #[error("Duplicate id {id} in {path}")]
    DuplicateId {
        /// Table file
        path: String,
        /// Repeated id
        id: Key,
    },

    /// The file exists but is not readable as CSV
    #[error("Failed to read file {path}: {source}")]
    Read {
        /// Table file
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A foreign key with no matching row
    #[error("Invalid {reference} ID in {path}")]
    UnknownReference {
        /// Which table the key should resolve against
        reference: Reference,
        /// File named in the message
        path: String,
        /// The unresolved key
        id: Key,
    },

    /// A weight or mark that does not parse as a finite number
    #[error("Invalid {quantity}, non-number")]
    NotANumber {
        /// Column family
        quantity: Quantity,
        /// Raw cell text
        value: String,
    },

    /// A weight or mark below zero
    #[error("Invalid {quantity}, negative value")]
    Negative {
        /// Column family
        quantity: Quantity,
        /// Parsed value
        value: f64,
    },

    /// A course whose test weights do not total exactly 100
    #[error("Invalid course weights")]
    WeightSum {
        /// Offending course
        course_id: Key,
        /// Accumulated weight
        total: f64,
    },

    /// Lookup miss after validation succeeded
    #[error("internal error: {0}")]
    Invariant(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInvocation => ErrorKind::InvalidInvocation,
            Error::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            Error::MissingColumn { .. }
            | Error::MissingValue { .. }
            | Error::DuplicateId { .. }
            | Error::Read { .. } => ErrorKind::SchemaViolation,
            Error::UnknownReference { .. } => ErrorKind::ReferentialViolation,
            Error::NotANumber { .. } | Error::Negative { .. } => ErrorKind::NumericViolation,
            Error::WeightSum { .. } => ErrorKind::WeightSumViolation,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
            Error::Invariant(_) => ErrorKind::Internal,
        }
    }
}
