//! Rollbook core: a fixed-layout binary record store for academic
//! administration.
//!
//! Three flat files hold the data: students (138-byte blocks), courses
//! (65-byte blocks), and registrations (45-byte blocks). All multi-byte
//! fields are little-endian and strings are null-padded to fixed widths.
//! Creation appends, listing scans, and every other mutation rewrites the
//! whole file atomically.
//!
//! [`api::Rollbook`] is the entry point; the other modules are exposed for
//! direct use by tooling and tests.

pub mod api;
pub mod encoding;
pub mod error;
pub mod report;
pub mod store;
pub mod types;
pub mod xref;

pub use api::Rollbook;
pub use error::{Error, Result};
