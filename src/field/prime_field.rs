//! Goldilocks prime field used by every layer of the verifier.
//!
//! Elements are stored in canonical form, i.e. the wrapped integer is always
//! in `[0, MODULUS)`.  Serialization uses **little-endian** byte order and
//! rejects non-canonical encodings.
//!
//! # Hardening
//!
//! Arithmetic is written without data-dependent early exits except for the
//! explicit zero check in [`FieldElementOps::inv`].  The implementation is not
//! audited for constant-time behaviour; callers handling secret values must
//! not rely on it.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Metadata describing the underlying field modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulus {
    /// Prime modulus value in canonical representation.
    pub value: u64,
    /// Two-adicity of `value - 1`.
    pub two_adicity: u32,
}

impl Modulus {
    /// Creates a new modulus descriptor.
    pub const fn new(value: u64, two_adicity: u32) -> Self {
        Self { value, two_adicity }
    }
}

/// `p = 2^64 - 2^32 + 1`.
pub const DEFAULT_MODULUS: Modulus = Modulus::new(0xffff_ffff_0000_0001, 32);

/// Primitive `2^32`-th root of unity, equal to `7^((p - 1) / 2^32)`.
const POWER_OF_TWO_GENERATOR: u64 = 1_753_635_133_440_165_772;

/// `2^32 - 1`, i.e. `2^64 mod p`.
const EPSILON: u64 = 0xffff_ffff;

/// Errors raised by field arithmetic and canonical decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The zero element has no multiplicative inverse.
    #[error("division by zero: the zero element has no inverse")]
    DivisionByZero,
    /// A raw value was not strictly below the modulus.
    #[error("non-canonical field element {value:#x}")]
    NonCanonical {
        /// Raw value that failed the range check.
        value: u64,
    },
    /// The requested root of unity exceeds the field's two-adicity.
    #[error("no 2^{log_n}-th root of unity (two-adicity is {max})")]
    TwoAdicityExceeded {
        /// Requested `log2` of the subgroup order.
        log_n: u32,
        /// Largest supported `log2` order.
        max: u32,
    },
}

/// Field element represented as a canonical value modulo the prime.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(u64);

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldElement").field(&self.0).finish()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FieldElement {
    /// Canonical prime modulus associated with this field.
    pub const MODULUS: Modulus = DEFAULT_MODULUS;
    /// Generator of the full multiplicative group; used as the coset shift of
    /// the first FRI layer.
    pub const MULTIPLICATIVE_GENERATOR: FieldElement = FieldElement(7);
    /// Additive identity in canonical form.
    pub const ZERO: FieldElement = FieldElement(0);
    /// Multiplicative identity in canonical form.
    pub const ONE: FieldElement = FieldElement(1);
    /// The element `2`.
    pub const TWO: FieldElement = FieldElement(2);
    /// Number of bytes in the canonical encoding.
    pub const BYTE_LENGTH: usize = 8;

    /// Reduces an arbitrary `u64` into the field.
    pub const fn new(value: u64) -> Self {
        if value >= Self::MODULUS.value {
            FieldElement(value - Self::MODULUS.value)
        } else {
            FieldElement(value)
        }
    }

    /// Wraps a value that must already be canonical.
    pub const fn from_canonical_u64(value: u64) -> Result<Self, FieldError> {
        if value >= Self::MODULUS.value {
            Err(FieldError::NonCanonical { value })
        } else {
            Ok(FieldElement(value))
        }
    }

    /// Returns the canonical integer representative.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` for the additive identity.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Raises the element to `exponent` using square-and-multiply.
    pub fn pow(self, mut exponent: u64) -> Self {
        let mut base = self;
        let mut acc = FieldElement::ONE;
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc.mul(&base);
            }
            base = base.square();
            exponent >>= 1;
        }
        acc
    }

    /// Returns a primitive `2^log_n`-th root of unity.
    pub fn two_adic_generator(log_n: u32) -> Result<Self, FieldError> {
        let max = Self::MODULUS.two_adicity;
        if log_n > max {
            return Err(FieldError::TwoAdicityExceeded { log_n, max });
        }
        let mut root = FieldElement(POWER_OF_TWO_GENERATOR);
        for _ in log_n..max {
            root = root.square();
        }
        Ok(root)
    }

    /// Serializes the element into canonical little-endian bytes.
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Decodes canonical little-endian bytes, rejecting values `>= MODULUS`.
    pub fn from_bytes(bytes: &[u8; 8]) -> Result<Self, FieldError> {
        Self::from_canonical_u64(u64::from_le_bytes(*bytes))
    }
}

/// Arithmetic contract for field elements.  Every method returns the
/// canonical representative.
pub trait FieldElementOps: Sized {
    /// Adds two field elements.
    fn add(&self, rhs: &Self) -> Self;
    /// Subtracts `rhs` from `self`.
    fn sub(&self, rhs: &Self) -> Self;
    /// Computes the additive inverse of `self`.
    fn neg(&self) -> Self;
    /// Multiplies two field elements.
    fn mul(&self, rhs: &Self) -> Self;
    /// Squares the field element.
    fn square(&self) -> Self;
    /// Computes the multiplicative inverse, failing for zero.
    fn inv(&self) -> Result<Self, FieldError>;
}

impl FieldElementOps for FieldElement {
    fn add(&self, rhs: &Self) -> Self {
        let (sum, carry) = self.0.overflowing_add(rhs.0);
        if carry {
            // The true sum is `sum + 2^64` and `2^64 = EPSILON (mod p)`; it stays below `p`.
            FieldElement(sum + EPSILON)
        } else {
            FieldElement::new(sum)
        }
    }

    fn sub(&self, rhs: &Self) -> Self {
        let (diff, borrow) = self.0.overflowing_sub(rhs.0);
        if borrow {
            FieldElement(diff.wrapping_add(Self::MODULUS.value))
        } else {
            FieldElement(diff)
        }
    }

    fn neg(&self) -> Self {
        FieldElement::ZERO.sub(self)
    }

    fn mul(&self, rhs: &Self) -> Self {
        let product = (self.0 as u128) * (rhs.0 as u128);
        FieldElement((product % (Self::MODULUS.value as u128)) as u64)
    }

    fn square(&self) -> Self {
        self.mul(self)
    }

    fn inv(&self) -> Result<Self, FieldError> {
        if self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(self.pow(Self::MODULUS.value - 2))
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        FieldElement::new(value)
    }
}

impl From<u32> for FieldElement {
    fn from(value: u32) -> Self {
        FieldElement(value as u64)
    }
}

impl From<FieldElement> for u64 {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        FieldElement::from_canonical_u64(raw).map_err(serde::de::Error::custom)
    }
}
