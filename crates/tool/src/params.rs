// Copyright 2026 The Binius Developers
//! Value parsers for command-line polynomials and widths.
//!
//! Polynomials are accepted in any notation [`Polynomial`]'s `FromStr` understands: decimal,
//! `0x` hex, `0b` binary, or algebraic (`x^8 + x^4 + x^3 + x^2 + 1`).

use gf2e_field::{FieldSpec, Polynomial};

pub fn polynomial(value: &str) -> Result<Polynomial, String> {
	value.parse::<Polynomial>().map_err(|err| err.to_string())
}

/// A polynomial other than zero.
pub fn nonzero_polynomial(value: &str) -> Result<Polynomial, String> {
	let poly = polynomial(value)?;
	if poly.is_zero() {
		return Err(format!("{value} is not a positive polynomial"));
	}
	Ok(poly)
}

/// A modulus of degree at least one.
pub fn modulus(value: &str) -> Result<FieldSpec, String> {
	FieldSpec::new(polynomial(value)?).map_err(|err| format!("{value}: {err}"))
}

pub fn positive_width(value: &str) -> Result<usize, String> {
	match value.parse::<usize>() {
		Ok(0) | Err(_) => Err(format!("{value} is not a positive integer")),
		Ok(width) => Ok(width),
	}
}
