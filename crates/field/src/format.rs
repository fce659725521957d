// Copyright 2026 The Binius Developers
use std::{fmt, str::FromStr, sync::LazyLock};

use num_bigint::BigUint;
use regex::Regex;

use crate::{error::FieldError, polynomial::Polynomial};

/// Largest exponent accepted in algebraic notation. Numeric notations are bounded by their length.
pub const MAX_ALGEBRAIC_EXPONENT: usize = 1 << 16;

static ALGEBRAIC_TERM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(?:x\^(\d+)|x|1)$").expect("term pattern is valid"));

/// Textual encodings of a polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolyFormat {
	/// Decimal integer, e.g. `17`.
	Int,
	/// Hexadecimal integer, e.g. `0x11`.
	Hex,
	/// Binary integer, e.g. `0b10001`.
	Bin,
	/// Algebraic notation, e.g. `x^4 + 1`.
	Alg,
}

impl PolyFormat {
	pub const ALL: [PolyFormat; 4] = [Self::Int, Self::Hex, Self::Bin, Self::Alg];

	/// Guesses the format of `input` from its prefix and alphabet.
	pub fn detect(input: &str) -> Self {
		let trimmed = input.trim_start().to_ascii_lowercase();
		if trimmed.starts_with("0x") {
			Self::Hex
		} else if trimmed.starts_with("0b") {
			Self::Bin
		} else if trimmed.contains('x') {
			Self::Alg
		} else {
			Self::Int
		}
	}

	/// Parses `input` in this format. Whitespace anywhere in the input is ignored.
	pub fn parse(self, input: &str) -> Result<Polynomial, FieldError> {
		let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
		let parsed = match self {
			Self::Int => BigUint::parse_bytes(compact.as_bytes(), 10).map(Polynomial::from),
			Self::Hex => strip_radix_prefix(&compact, "0x")
				.and_then(|digits| BigUint::parse_bytes(digits.as_bytes(), 16))
				.map(Polynomial::from),
			Self::Bin => strip_radix_prefix(&compact, "0b")
				.and_then(|digits| BigUint::parse_bytes(digits.as_bytes(), 2))
				.map(Polynomial::from),
			Self::Alg => parse_algebraic(&compact.to_ascii_lowercase()),
		};
		parsed.ok_or_else(|| FieldError::Parse {
			input: input.to_string(),
			format: self,
		})
	}

	pub fn render(self, poly: &Polynomial) -> String {
		let value = poly.as_biguint();
		match self {
			Self::Int => value.to_str_radix(10),
			Self::Hex => format!("0x{}", value.to_str_radix(16)),
			Self::Bin => format!("0b{}", value.to_str_radix(2)),
			Self::Alg => render_algebraic(poly),
		}
	}
}

fn strip_radix_prefix<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
	let digits = match input.get(..prefix.len()) {
		Some(head) if head.eq_ignore_ascii_case(prefix) => &input[prefix.len()..],
		_ => input,
	};
	(!digits.is_empty()).then_some(digits)
}

fn parse_algebraic(input: &str) -> Option<Polynomial> {
	if input == "0" {
		return Some(Polynomial::zero());
	}
	let mut value = Polynomial::zero();
	for term in input.split('+') {
		let captures = ALGEBRAIC_TERM.captures(term)?;
		let exponent = match captures.get(1) {
			Some(digits) => digits
				.as_str()
				.parse::<usize>()
				.ok()
				.filter(|&exponent| exponent <= MAX_ALGEBRAIC_EXPONENT)?,
			None if term == "x" => 1,
			None => 0,
		};
		// Repeated terms set the coefficient once rather than cancelling.
		if !value.bit(exponent) {
			value ^= &Polynomial::monomial(exponent);
		}
	}
	Some(value)
}

fn render_algebraic(poly: &Polynomial) -> String {
	if poly.is_zero() {
		return "0".to_string();
	}
	poly.bit_positions()
		.into_iter()
		.rev()
		.map(|exponent| match exponent {
			0 => "1".to_string(),
			1 => "x".to_string(),
			_ => format!("x^{exponent}"),
		})
		.collect::<Vec<_>>()
		.join(" + ")
}

impl fmt::Display for PolyFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Int => "int",
			Self::Hex => "hex",
			Self::Bin => "bin",
			Self::Alg => "alg",
		};
		f.write_str(name)
	}
}

impl FromStr for PolyFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|format| format.to_string() == s)
			.ok_or_else(|| {
				format!("unknown polynomial format {s:?}, expected int, hex, bin or alg")
			})
	}
}
