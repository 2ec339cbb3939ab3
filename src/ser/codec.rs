use crate::field::FieldElement;
use crate::hash::DIGEST_SIZE;
use crate::merkle::Digest;

use super::error::{SerError, SerKind, SerResult};

/// Append-only little-endian encoder.
#[derive(Debug, Default)]
pub struct ByteWriter {
    out: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u16(&mut self, value: u16) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    pub fn u32(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    pub fn u64(&mut self, value: u64) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    /// Field elements travel as their canonical `u64`.
    pub fn felt(&mut self, value: FieldElement) {
        self.u64(value.as_u64());
    }

    pub fn digest(&mut self, digest: &Digest) {
        self.out.extend_from_slice(digest.as_bytes());
    }

    /// Writes `items` behind a `u32` count prefix.
    pub fn vec<T>(
        &mut self,
        items: &[T],
        kind: SerKind,
        field: &'static str,
        mut item: impl FnMut(&mut Self, &T) -> SerResult<()>,
    ) -> SerResult<()> {
        let count = u32::try_from(items.len()).map_err(|_| SerError::invalid_length(kind, field))?;
        self.u32(count);
        items.iter().try_for_each(|value| item(self, value))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}

/// Cursor over an encoded buffer. Every read names the section and field it
/// decodes so failures point at the offending part of the input.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take<const N: usize>(&mut self, kind: SerKind, field: &'static str) -> SerResult<[u8; N]> {
        let end = self.offset + N;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or_else(|| SerError::unexpected_end(kind, field))?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.offset = end;
        Ok(out)
    }

    pub fn u16(&mut self, kind: SerKind, field: &'static str) -> SerResult<u16> {
        self.take(kind, field).map(u16::from_le_bytes)
    }

    pub fn u32(&mut self, kind: SerKind, field: &'static str) -> SerResult<u32> {
        self.take(kind, field).map(u32::from_le_bytes)
    }

    pub fn u64(&mut self, kind: SerKind, field: &'static str) -> SerResult<u64> {
        self.take(kind, field).map(u64::from_le_bytes)
    }

    /// Reads a field element, rejecting values at or above the modulus.
    pub fn felt(&mut self, kind: SerKind, field: &'static str) -> SerResult<FieldElement> {
        let raw = self.u64(kind, field)?;
        FieldElement::from_canonical_u64(raw).map_err(|_| SerError::invalid_value(kind, field))
    }

    pub fn digest(&mut self, kind: SerKind, field: &'static str) -> SerResult<Digest> {
        self.take::<DIGEST_SIZE>(kind, field).map(Digest::new)
    }

    /// Reads a `u32` count followed by that many items.
    ///
    /// `min_item_len` is the smallest encoding of one item; a count that
    /// cannot fit in the remaining input fails before anything is allocated.
    pub fn vec<T>(
        &mut self,
        kind: SerKind,
        field: &'static str,
        min_item_len: usize,
        mut item: impl FnMut(&mut Self) -> SerResult<T>,
    ) -> SerResult<Vec<T>> {
        let count = self.u32(kind, field)? as usize;
        if count.saturating_mul(min_item_len.max(1)) > self.remaining() {
            return Err(SerError::invalid_length(kind, field));
        }
        (0..count).map(|_| item(self)).collect()
    }

    /// Fails with `TrailingBytes` unless the whole buffer was consumed.
    pub fn finish(self, kind: SerKind) -> SerResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(SerError::TrailingBytes {
                kind,
                consumed: self.offset,
                remaining,
            }),
        }
    }
}
