//! Fixed-layout binary codecs, one per record kind.
//!
//! Every record kind maps bijectively onto a fixed-size little-endian block:
//! string fields are UTF-8, truncated to their declared width and right-padded
//! with zero bytes; integer fields are written at their declared byte width.
//! Decoding trims trailing zero bytes from string fields and fails (without
//! panicking) on wrong block length or invalid UTF-8.

mod course;
mod registration;
mod student;

pub use course::{COURSE_ID_LEN, COURSE_NAME_LEN};
pub use registration::{REG_COURSE_ID_LEN, REG_STUDENT_ID_LEN};
pub use student::{MAJOR_LEN, NAME_LEN, STUDENT_ID_LEN};

use crate::error::DecodeError;

/// A record kind with a fixed on-disk layout.
pub trait Record: Sized {
    /// Exact size in bytes of one encoded block.
    const SIZE: usize;

    /// Kind name used in errors and log messages.
    const KIND: &'static str;

    /// Encode into a block of exactly [`Self::SIZE`] bytes. String fields
    /// longer than their declared width are silently truncated.
    fn encode(&self) -> Vec<u8>;

    /// Decode one block. Fails if `buf` is not exactly [`Self::SIZE`] bytes
    /// or a string field is not valid UTF-8.
    fn decode(buf: &[u8]) -> Result<Self, DecodeError>;
}

/// Append `s` to `out` as a zero-padded field of exactly `width` bytes.
///
/// Truncation backs off to the nearest char boundary so the stored bytes
/// always remain valid UTF-8.
pub(crate) fn put_str(out: &mut Vec<u8>, s: &str, width: usize) {
    let mut end = s.len().min(width);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    out.extend_from_slice(&s.as_bytes()[..end]);
    out.resize(out.len() + (width - end), 0);
}

/// Read a zero-padded string field back out of `buf`.
pub(crate) fn get_str(
    buf: &[u8],
    kind: &'static str,
    field: &'static str,
) -> Result<String, DecodeError> {
    let end = buf.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
    String::from_utf8(buf[..end].to_vec())
        .map_err(|_| DecodeError::InvalidUtf8 { kind, field })
}

/// Reject blocks that are not exactly the declared record size.
pub(crate) fn check_len(
    buf: &[u8],
    kind: &'static str,
    expected: usize,
) -> Result<(), DecodeError> {
    if buf.len() != expected {
        return Err(DecodeError::WrongLength {
            kind,
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}
