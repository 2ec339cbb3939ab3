//! Canonical little-endian codec shared by the wire formats of the crate.
//!
//! [`ByteWriter`] appends, [`ByteReader`] consumes. Every read reports
//! failures with the section ([`SerKind`]) and field name being decoded.
//! Length prefixes are `u32`, and counts that cannot possibly fit in the
//! remaining input are rejected before allocating.

mod codec;
mod error;

pub use codec::{ByteReader, ByteWriter};
pub use error::{SerError, SerKind, SerResult};
