//! Error types for all Rollbook operations.

use std::io;
use thiserror::Error;

/// Top-level error type for Rollbook operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },
}

/// I/O-level failures from the backing record files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A stored block failed to parse. Scans recover by skipping the block;
/// these errors never abort a listing or report.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{kind} record has wrong length: expected {expected} bytes, got {actual}")]
    WrongLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid UTF-8 in {kind} field '{field}'")]
    InvalidUtf8 {
        kind: &'static str,
        field: &'static str,
    },
}

/// A user-supplied field failed a type, range, or referential expectation.
/// Always recoverable: the operation aborts and no file is mutated.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyKey { field: &'static str },

    #[error("duplicate {kind} key '{key}'")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("semester must be 1, 2, or 3 (got {0})")]
    InvalidSemester(u8),

    #[error("student '{0}' does not exist")]
    UnknownStudent(String),

    #[error("student '{0}' is inactive and cannot register")]
    InactiveStudent(String),

    #[error("course '{0}' does not exist")]
    UnknownCourse(String),

    #[error("course '{0}' is not open for registration")]
    InactiveCourse(String),

    #[error("registration ids exhausted")]
    RegisterIdExhausted,
}

pub type Result<T> = std::result::Result<T, Error>;
