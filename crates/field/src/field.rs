// Copyright 2026 The Binius Developers
use rand::Rng;

use crate::{error::FieldError, polynomial::Polynomial};

/// The binary extension field GF(2^e) defined by a modulus `h(x)` of degree `e >= 1`.
///
/// Irreducibility of the modulus is the caller's responsibility; only the degree is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldSpec {
	modulus: Polynomial,
	degree: usize,
}

impl FieldSpec {
	pub fn new(modulus: Polynomial) -> Result<Self, FieldError> {
		match modulus.degree() {
			None => Err(FieldError::InvalidPolynomial("modulus is zero")),
			Some(0) => Err(FieldError::InvalidPolynomial("modulus must have degree at least 1")),
			Some(degree) => Ok(Self { modulus, degree }),
		}
	}

	pub fn modulus(&self) -> &Polynomial {
		&self.modulus
	}

	/// The extension degree `e`, which is also the bit width of every field element.
	pub fn degree(&self) -> usize {
		self.degree
	}

	pub fn reduce(&self, value: &Polynomial) -> Polynomial {
		// The modulus is non-zero by construction.
		value
			.modulo(&self.modulus)
			.unwrap_or_else(|_| unreachable!("FieldSpec modulus is never zero"))
	}

	/// Whether `value` is already a reduced field element.
	pub fn contains(&self, value: &Polynomial) -> bool {
		value.bit_len() <= self.degree
	}

	pub fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> Polynomial {
		Polynomial::random(rng, self.degree)
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_field_degree() {
		let field = FieldSpec::new(Polynomial::from(285)).unwrap();
		assert_eq!(field.degree(), 8);
		assert_eq!(field.modulus(), &Polynomial::from(285));
		assert!(field.contains(&Polynomial::from(0xff)));
		assert!(!field.contains(&Polynomial::from(0x100)));
	}

	#[test]
	fn test_degenerate_moduli_are_rejected() {
		assert_matches!(
			FieldSpec::new(Polynomial::zero()),
			Err(FieldError::InvalidPolynomial(_))
		);
		assert_matches!(FieldSpec::new(Polynomial::one()), Err(FieldError::InvalidPolynomial(_)));
		assert!(FieldSpec::new(Polynomial::from(0b10)).is_ok());
	}

	#[test]
	fn test_reduce() {
		let field = FieldSpec::new(Polynomial::from(0b1011)).unwrap();
		// x^3 = x + 1 mod x^3 + x + 1
		assert_eq!(field.reduce(&Polynomial::from(0b1000)), Polynomial::from(0b011));
		assert!(field.contains(&field.reduce(&Polynomial::from(0xffff))));
	}
}
