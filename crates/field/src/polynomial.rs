// Copyright 2026 The Binius Developers
use std::{
	fmt,
	ops::{BitXor, BitXorAssign, Shl},
	str::FromStr,
};

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;

use crate::{error::FieldError, format::PolyFormat};

/// A polynomial over GF(2), stored as a bit mask where bit `i` is the coefficient of `x^i`.
///
/// Addition is XOR and multiplication is carry-less, so no operation can ever produce a negative
/// value. The zero polynomial has no degree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Polynomial(BigUint);

impl Polynomial {
	pub fn zero() -> Self {
		Self(BigUint::zero())
	}

	pub fn one() -> Self {
		Self(BigUint::one())
	}

	/// The polynomial `x^exponent`.
	pub fn monomial(exponent: usize) -> Self {
		Self(BigUint::one() << exponent)
	}

	pub fn as_biguint(&self) -> &BigUint {
		&self.0
	}

	pub fn to_u64(&self) -> Option<u64> {
		self.0.to_u64()
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	/// Number of bits needed to hold the polynomial, i.e. `degree + 1`, or 0 for zero.
	pub fn bit_len(&self) -> usize {
		self.0.bits() as usize
	}

	/// Highest exponent with a non-zero coefficient, `None` for the zero polynomial.
	pub fn degree(&self) -> Option<usize> {
		self.bit_len().checked_sub(1)
	}

	/// Coefficient of `x^exponent`.
	pub fn bit(&self, exponent: usize) -> bool {
		self.0.bit(exponent as u64)
	}

	/// Exponents with coefficient 1, in ascending order.
	///
	/// ```
	/// # use gf2e_field::Polynomial;
	/// assert_eq!(Polynomial::from(0b10110u64).bit_positions(), vec![1, 2, 4]);
	/// ```
	pub fn bit_positions(&self) -> Vec<usize> {
		(0..self.bit_len()).filter(|&i| self.bit(i)).collect()
	}

	/// Drops every coefficient at or above `x^width`.
	pub fn truncate(&self, width: usize) -> Self {
		if self.bit_len() <= width {
			return self.clone();
		}
		let mask = (BigUint::one() << width) - 1u32;
		Self(&self.0 & &mask)
	}

	/// The `width`-bit field starting at bit `offset`.
	pub fn slice(&self, offset: usize, width: usize) -> Self {
		Self(&self.0 >> offset).truncate(width)
	}

	/// Packs equal-width values into one bus, value `i` occupying bits `[(i+1)w-1 : i*w]`.
	pub fn pack(values: &[Polynomial], width: usize) -> Self {
		values
			.iter()
			.enumerate()
			.fold(Self::zero(), |acc, (i, value)| acc ^ (&value.truncate(width) << (i * width)))
	}

	/// Carry-less product: `other` shifted by every set exponent of `self`, XORed together.
	pub fn clmul(&self, other: &Self) -> Self {
		self.bit_positions()
			.into_iter()
			.fold(Self::zero(), |acc, exponent| acc ^ (other << exponent))
	}

	/// Remainder of `self` divided by `modulus` using XOR long division.
	///
	/// Fails with [`FieldError::InvalidPolynomial`] when the modulus is zero.
	pub fn modulo(&self, modulus: &Self) -> Result<Self, FieldError> {
		let modulus_degree = modulus
			.degree()
			.ok_or(FieldError::InvalidPolynomial("modulus is zero"))?;
		let mut remainder = self.clone();
		while let Some(degree) = remainder.degree() {
			if degree < modulus_degree {
				break;
			}
			remainder ^= &(modulus << (degree - modulus_degree));
		}
		Ok(remainder)
	}

	/// Uniformly random polynomial with at most `width` bits.
	pub fn random<R: Rng + ?Sized>(rng: &mut R, width: usize) -> Self {
		let digits = (0..width.div_ceil(32)).map(|_| rng.random::<u32>()).collect();
		Self(BigUint::new(digits)).truncate(width)
	}

	pub fn to_string_as(&self, format: PolyFormat) -> String {
		format.render(self)
	}
}

/// `a(x)·p(x) + c(x)` over GF(2), without reduction.
pub fn affine(a: &Polynomial, p: &Polynomial, c: &Polynomial) -> Polynomial {
	a.clmul(p) ^ c
}

/// `a(x)·p(x) + c(x) mod h(x)` over GF(2).
pub fn affine_mod(
	a: &Polynomial,
	p: &Polynomial,
	c: &Polynomial,
	h: &Polynomial,
) -> Result<Polynomial, FieldError> {
	affine(a, p, c).modulo(h)
}

impl From<u64> for Polynomial {
	fn from(value: u64) -> Self {
		Self(BigUint::from(value))
	}
}

impl From<BigUint> for Polynomial {
	fn from(value: BigUint) -> Self {
		Self(value)
	}
}

impl BitXor for Polynomial {
	type Output = Polynomial;

	fn bitxor(self, rhs: Self) -> Polynomial {
		Polynomial(self.0 ^ rhs.0)
	}
}

impl BitXor<&Polynomial> for Polynomial {
	type Output = Polynomial;

	fn bitxor(self, rhs: &Polynomial) -> Polynomial {
		Polynomial(self.0 ^ &rhs.0)
	}
}

impl BitXor<&Polynomial> for &Polynomial {
	type Output = Polynomial;

	fn bitxor(self, rhs: &Polynomial) -> Polynomial {
		Polynomial(&self.0 ^ &rhs.0)
	}
}

impl BitXorAssign<&Polynomial> for Polynomial {
	fn bitxor_assign(&mut self, rhs: &Polynomial) {
		self.0 ^= &rhs.0;
	}
}

impl Shl<usize> for &Polynomial {
	type Output = Polynomial;

	fn shl(self, rhs: usize) -> Polynomial {
		Polynomial(&self.0 << rhs)
	}
}

impl Shl<usize> for Polynomial {
	type Output = Polynomial;

	fn shl(self, rhs: usize) -> Polynomial {
		Polynomial(self.0 << rhs)
	}
}

/// Algebraic notation, e.g. `x^4 + 1`.
impl fmt::Display for Polynomial {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&PolyFormat::Alg.render(self))
	}
}

/// Accepts any [`PolyFormat`], detected from the text itself.
impl FromStr for Polynomial {
	type Err = FieldError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		PolyFormat::detect(s).parse(s)
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use proptest::prelude::*;
	use rand::{SeedableRng, rngs::StdRng};

	use super::*;

	fn poly(value: u64) -> Polynomial {
		Polynomial::from(value)
	}

	fn arb_poly() -> impl Strategy<Value = Polynomial> {
		prop::collection::vec(any::<u32>(), 0..4)
			.prop_map(|digits| Polynomial::from(BigUint::new(digits)))
	}

	#[test]
	fn test_bit_positions() {
		assert!(poly(0).bit_positions().is_empty());
		assert_eq!(poly(0b10110).bit_positions(), vec![1, 2, 4]);
		assert_eq!(Polynomial::monomial(70).bit_positions(), vec![70]);
	}

	#[test]
	fn test_degree() {
		assert_eq!(poly(0).degree(), None);
		assert_eq!(poly(1).degree(), Some(0));
		assert_eq!(poly(285).degree(), Some(8));
		assert_eq!(Polynomial::monomial(130).degree(), Some(130));
	}

	#[test]
	fn test_modulo_known_values() {
		let h = poly(285);
		// x^8 = x^4 + x^3 + x^2 + 1 in GF(2^8) with h = x^8 + x^4 + x^3 + x^2 + 1
		assert_eq!(poly(1 << 8).modulo(&h).unwrap(), poly(0b11101));
		assert_eq!(poly(0xab).modulo(&h).unwrap(), poly(0xab));
		assert_eq!(h.modulo(&h).unwrap(), poly(0));
		// h = 1 reduces everything to zero
		assert_eq!(poly(0xdead).modulo(&poly(1)).unwrap(), poly(0));
	}

	#[test]
	fn test_modulo_by_zero_is_rejected() {
		assert_matches!(poly(5).modulo(&poly(0)), Err(FieldError::InvalidPolynomial(_)));
	}

	#[test]
	fn test_affine_known_values() {
		// (x^4 + 1)(x + 1) + 1 = x^5 + x^4 + x
		assert_eq!(affine(&poly(17), &poly(3), &poly(1)), poly(0b110010));
		assert_eq!(affine(&poly(0), &poly(0xff), &poly(9)), poly(9));
	}

	#[test]
	fn test_truncate_and_slice() {
		assert_eq!(poly(0b1011_0110).truncate(4), poly(0b0110));
		assert_eq!(poly(0b1011_0110).truncate(64), poly(0b1011_0110));
		assert_eq!(poly(0b1011_0110).slice(4, 3), poly(0b011));
	}

	#[test]
	fn test_pack_places_first_value_lowest() {
		let packed = Polynomial::pack(&[poly(0x1), poly(0x2), poly(0xf)], 4);
		assert_eq!(packed, poly(0xf21));
		assert_eq!(packed.slice(4, 4), poly(0x2));
	}

	#[test]
	fn test_random_respects_width() {
		let mut rng = StdRng::seed_from_u64(42);
		for width in [1, 7, 32, 33, 100] {
			for _ in 0..16 {
				assert!(Polynomial::random(&mut rng, width).bit_len() <= width);
			}
		}
		assert!(Polynomial::random(&mut rng, 0).is_zero());
	}

	#[test]
	fn test_random_is_reproducible() {
		let a = Polynomial::random(&mut StdRng::seed_from_u64(42), 77);
		let b = Polynomial::random(&mut StdRng::seed_from_u64(42), 77);
		assert_eq!(a, b);
	}

	proptest! {
		#[test]
		fn prop_affine_xor_is_self_inverse(a in arb_poly(), p in arb_poly()) {
			let product = affine(&a, &p, &Polynomial::zero());
			prop_assert!((&product ^ &product).is_zero());
		}

		#[test]
		fn prop_affine_adds_constant(a in arb_poly(), p in arb_poly(), c in arb_poly()) {
			prop_assert_eq!(affine(&a, &p, &c), affine(&a, &p, &Polynomial::zero()) ^ &c);
		}

		#[test]
		fn prop_clmul_commutes(a in arb_poly(), p in arb_poly()) {
			prop_assert_eq!(a.clmul(&p), p.clmul(&a));
		}

		#[test]
		fn prop_modulo_degree_below_modulus(y in arb_poly(), h in arb_poly()) {
			prop_assume!(!h.is_zero());
			let r = y.modulo(&h).unwrap();
			prop_assert!(r.degree() < h.degree());
		}

		#[test]
		fn prop_modulo_is_idempotent(y in arb_poly(), h in arb_poly()) {
			prop_assume!(!h.is_zero());
			let r = y.modulo(&h).unwrap();
			prop_assert_eq!(r.modulo(&h).unwrap(), r);
		}

		#[test]
		fn prop_affine_mod_reduces_affine(
			a in arb_poly(),
			p in arb_poly(),
			c in arb_poly(),
			h in arb_poly(),
		) {
			prop_assume!(!h.is_zero());
			prop_assert_eq!(
				affine_mod(&a, &p, &c, &h).unwrap(),
				affine(&a, &p, &c).modulo(&h).unwrap()
			);
		}

		#[test]
		fn prop_modulo_is_linear(x in arb_poly(), y in arb_poly(), h in arb_poly()) {
			prop_assume!(!h.is_zero());
			let lhs = (&x ^ &y).modulo(&h).unwrap();
			let rhs = x.modulo(&h).unwrap() ^ y.modulo(&h).unwrap();
			prop_assert_eq!(lhs, rhs);
		}
	}
}
