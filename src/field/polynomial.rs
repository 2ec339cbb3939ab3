//! Dense polynomials over the prime field.
//!
//! The verifier itself never interpolates; polynomials describe the
//! low-degree codewords that tests and benchmarks commit to.

use super::{FieldElement, FieldElementOps};

/// Dense polynomial represented by coefficients in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    /// Coefficients starting from the constant term.
    pub coefficients: Vec<FieldElement>,
}

impl Polynomial {
    /// Constructs a polynomial from raw coefficients.
    pub fn new(coefficients: Vec<FieldElement>) -> Self {
        Self { coefficients }
    }

    /// Evaluates the polynomial at the provided point using Horner's method.
    pub fn evaluate(&self, point: FieldElement) -> FieldElement {
        self.coefficients
            .iter()
            .rev()
            .fold(FieldElement::ZERO, |acc, coeff| acc.mul(&point).add(coeff))
    }

    /// Returns the degree of the polynomial or `None` if the polynomial is zero.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients
            .iter()
            .enumerate()
            .rev()
            .find(|(_, coeff)| !coeff.is_zero())
            .map(|(idx, _)| idx)
    }
}
