//! Field arithmetic primitives for the verifier.
//! Contains the Goldilocks prime field and dense polynomial utilities.

pub mod polynomial;
pub mod prime_field;

pub use polynomial::Polynomial;
pub use prime_field::{FieldElement, FieldElementOps, FieldError};
