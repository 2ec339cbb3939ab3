use core::fmt;

use blake2::{Blake2s256, Digest};

use super::DIGEST_SIZE;

/// Digest produced by the canonical helper.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash {
    bytes: [u8; DIGEST_SIZE],
}

impl Hash {
    /// Constructs a hash value from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the canonical byte representation of the digest.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.bytes
    }

    /// Consumes the hash and returns the underlying byte array.
    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.bytes
    }

    /// Returns a helper that formats the digest as lowercase hexadecimal.
    pub fn to_hex(&self) -> HexOutput {
        HexOutput(self.bytes)
    }
}

impl From<[u8; DIGEST_SIZE]> for Hash {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Hash> for [u8; DIGEST_SIZE] {
    fn from(hash: Hash) -> Self {
        hash.into_bytes()
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash(0x{})", self.to_hex())
    }
}

/// Hexadecimal representation of a digest.
#[derive(Clone, Copy)]
pub struct HexOutput([u8; DIGEST_SIZE]);

impl fmt::Display for HexOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Streaming Blake2s-256 hasher.
#[derive(Clone, Default)]
pub struct Hasher {
    state: Blake2s256,
}

impl Hasher {
    /// Creates a new hasher instance.
    pub fn new() -> Self {
        Self {
            state: Blake2s256::new(),
        }
    }

    /// Absorbs additional bytes into the hasher state.
    pub fn update(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.state, bytes);
    }

    /// Finalises the hasher and returns a 32-byte digest.
    pub fn finalize(self) -> Hash {
        Hash::from_bytes(self.state.finalize().into())
    }
}

/// Computes the Blake2s-256 digest of `input`.
pub fn hash(input: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(input);
    hasher.finalize()
}

/// Counter-mode extendable output built on Blake2s.
///
/// Block `i` is `Blake2s(state_{i} || i_le)` and becomes `state_{i+1}`, so the
/// stream never repeats within one reader.
#[derive(Debug, Clone)]
pub struct Blake2sXof {
    state: [u8; DIGEST_SIZE],
    counter: u64,
}

impl Blake2sXof {
    /// Creates a new XOF instance from an arbitrary seed.
    pub fn new(seed: &[u8]) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(seed);
        hasher.update(b"/XOF");
        Self::from_state(hasher.finalize().into_bytes())
    }

    /// Creates a new XOF starting from an existing 32-byte hash state.
    pub fn from_state(state: [u8; DIGEST_SIZE]) -> Self {
        Self { state, counter: 0 }
    }

    /// Returns the next 64 bits from the stream: the low eight bytes of a
    /// fresh block, little-endian.
    pub fn next_u64(&mut self) -> u64 {
        let block = self.squeeze_block();
        let mut word = [0u8; 8];
        word.copy_from_slice(&block[..8]);
        u64::from_le_bytes(word)
    }

    fn squeeze_block(&mut self) -> [u8; DIGEST_SIZE] {
        let mut hasher = Hasher::new();
        hasher.update(&self.state);
        hasher.update(&self.counter.to_le_bytes());
        let block = hasher.finalize().into_bytes();
        self.state = block;
        self.counter = self.counter.wrapping_add(1);
        block
    }
}
