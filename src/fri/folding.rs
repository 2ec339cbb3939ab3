//! Binary folding over multiplicative cosets.
//!
//! Layer `i` of a FRI instance with first-layer size `N_0` is the coset
//! `s^(2^i) * <w_i>` of size `N_i = N_0 / 2^i`, where `s` is the field's
//! multiplicative generator and `w_i` a primitive `N_i`-th root of unity.
//! Position `j` holds the point `s^(2^i) * w_i^j`; its conjugate
//! `j + N_i / 2 mod N_i` holds `-x`, and both square to position
//! `j mod N_i / 2` of layer `i + 1`.

use crate::field::{FieldElement, FieldElementOps, FieldError};

/// `1/2` in the Goldilocks field.
const INV_TWO: FieldElement = FieldElement::new(0x7fff_ffff_8000_0001);

/// Evaluation domain of one FRI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerDomain {
    log_size: u32,
    shift: FieldElement,
    generator: FieldElement,
}

impl LayerDomain {
    /// Domain of layer `round` for a first layer of size `2^log_domain_size`.
    pub fn new(log_domain_size: u32, round: usize) -> Result<Self, FieldError> {
        let log_size = log_domain_size
            .checked_sub(round as u32)
            .ok_or(FieldError::TwoAdicityExceeded {
                log_n: round as u32,
                max: log_domain_size,
            })?;
        let mut shift = FieldElement::MULTIPLICATIVE_GENERATOR;
        for _ in 0..round {
            shift = shift.square();
        }
        Ok(Self {
            log_size,
            shift,
            generator: FieldElement::two_adic_generator(log_size)?,
        })
    }

    /// Number of points `N_i`.
    pub fn size(&self) -> usize {
        1usize << self.log_size
    }

    /// `log2(N_i)`, also the depth of the layer's Merkle tree.
    pub fn log_size(&self) -> u32 {
        self.log_size
    }

    /// Coset shift `s^(2^i)`.
    pub fn shift(&self) -> FieldElement {
        self.shift
    }

    /// Point at `position`.
    pub fn point(&self, position: usize) -> FieldElement {
        self.shift.mul(&self.generator.pow(position as u64))
    }

    /// Position holding the negation of the point at `position`.
    pub fn conjugate(&self, position: usize) -> usize {
        let half = self.size() / 2;
        (position + half) % self.size()
    }

    /// Position of `x^2` in the next layer.
    pub fn folded_position(&self, position: usize) -> usize {
        position % (self.size() / 2).max(1)
    }

    /// Every point of the domain in position order.
    pub fn points(&self) -> Vec<FieldElement> {
        let mut out = Vec::with_capacity(self.size());
        let mut current = self.shift;
        for _ in 0..self.size() {
            out.push(current);
            current = current.mul(&self.generator);
        }
        out
    }
}

/// Folds the pair `f(x)`, `f(-x)` with challenge `beta`:
/// `(f(x) + f(-x)) / 2 + beta * (f(x) - f(-x)) / (2x)`.
pub fn fold_pair(
    value: FieldElement,
    conjugate_value: FieldElement,
    x: FieldElement,
    beta: FieldElement,
) -> Result<FieldElement, FieldError> {
    let even = value.add(&conjugate_value).mul(&INV_TWO);
    let odd = value
        .sub(&conjugate_value)
        .mul(&INV_TWO)
        .mul(&x.inv()?);
    Ok(even.add(&beta.mul(&odd)))
}

/// Folds a whole layer given its domain.
///
/// Used to build honest layers in tests and benches.
pub fn fold_layer(
    evaluations: &[FieldElement],
    domain: &LayerDomain,
    beta: FieldElement,
) -> Result<Vec<FieldElement>, FieldError> {
    let half = evaluations.len() / 2;
    let points = domain.points();
    (0..half)
        .map(|j| fold_pair(evaluations[j], evaluations[j + half], points[j], beta))
        .collect()
}
