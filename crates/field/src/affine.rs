// Copyright 2026 The Binius Developers
use crate::{
	field::FieldSpec,
	polynomial::{self, Polynomial},
};

/// Constants `(a(x), c(x))` of the affine map `p(x) -> a(x)·p(x) + c(x)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AffineSpec {
	pub a: Polynomial,
	pub c: Polynomial,
}

impl AffineSpec {
	pub fn new(a: Polynomial, c: Polynomial) -> Self {
		Self { a, c }
	}

	pub fn apply(&self, p: &Polynomial) -> Polynomial {
		polynomial::affine(&self.a, p, &self.c)
	}

	pub fn apply_mod(&self, p: &Polynomial, field: &FieldSpec) -> Polynomial {
		field.reduce(&self.apply(p))
	}

	/// Both constants reduced modulo the field polynomial.
	///
	/// The recurrence is unchanged on field elements, since `a(x)` only ever multiplies values that
	/// are already reduced.
	pub fn reduced(&self, field: &FieldSpec) -> Self {
		Self {
			a: field.reduce(&self.a),
			c: field.reduce(&self.c),
		}
	}

	/// `a(x) ≡ 0 mod h(x)`: the recurrence collapses to the constant `c(x)`.
	pub fn is_degenerate(&self, field: &FieldSpec) -> bool {
		field.reduce(&self.a).is_zero()
	}

	/// Applies `x -> a·x + c mod h` to `seed` `steps` times.
	pub fn iterate(&self, seed: &Polynomial, field: &FieldSpec, steps: usize) -> Polynomial {
		(0..steps).fold(seed.clone(), |state, _| self.apply_mod(&state, field))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn field_285() -> FieldSpec {
		FieldSpec::new(Polynomial::from(285)).unwrap()
	}

	#[test]
	fn test_iterate_zero_steps_returns_seed() {
		let affine = AffineSpec::new(Polynomial::from(23), Polynomial::from(5));
		let seed = Polynomial::from(0x5a);
		assert_eq!(affine.iterate(&seed, &field_285(), 0), seed);
	}

	#[test]
	fn test_iterate_matches_repeated_application() {
		let field = field_285();
		let affine = AffineSpec::new(Polynomial::from(23), Polynomial::from(5));
		let mut x = Polynomial::zero();
		for _ in 0..100 {
			x = polynomial::affine_mod(&affine.a, &x, &affine.c, field.modulus()).unwrap();
		}
		assert_eq!(affine.iterate(&Polynomial::zero(), &field, 100), x);
		assert!(field.contains(&x));
	}

	#[test]
	fn test_reduced_preserves_recurrence() {
		let field = field_285();
		let affine = AffineSpec::new(Polynomial::from(0x1_2345), Polynomial::from(0xabcd));
		let reduced = affine.reduced(&field);
		assert!(field.contains(&reduced.a));
		assert!(field.contains(&reduced.c));
		for seed in [0u64, 1, 0x80, 0xff] {
			let seed = Polynomial::from(seed);
			assert_eq!(affine.iterate(&seed, &field, 17), reduced.iterate(&seed, &field, 17));
		}
	}

	#[test]
	fn test_degenerate_multiplier() {
		let field = field_285();
		assert!(AffineSpec::new(Polynomial::from(285), Polynomial::one()).is_degenerate(&field));
		assert!(!AffineSpec::new(Polynomial::from(17), Polynomial::one()).is_degenerate(&field));
		let collapsed = AffineSpec::new(Polynomial::from(285), Polynomial::from(7));
		assert_eq!(collapsed.iterate(&Polynomial::from(0x33), &field, 3), Polynomial::from(7));
	}
}
