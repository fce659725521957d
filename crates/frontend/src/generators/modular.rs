// Copyright 2026 The Binius Developers
use gf2e_field::{FieldSpec, Polynomial};
use rand::rngs::StdRng;

use super::{Generator, data_ports, ensure_width, reduce_vectors};
use crate::{
	config::GenerationConfig,
	error::{ContractViolation, Error},
	module::{Drive, Expectation, Port, StimulusValue, TestHarness},
	netlist::{BitRange, Expr, Netlist},
	session::GenerationSession,
	shape::CircuitShape,
};

pub const INPUT_PORT: &str = "in_poly";
pub const OUTPUT_PORT: &str = "out_poly";

/// Reduction of a `b`-bit polynomial modulo `h(x)` of degree `D`.
///
/// Every bit `i >= D` of the input contributes the fixed remainder `x^i mod h`, so the circuit is
/// one bit-gated constant per high bit plus the low `D` bits, XORed by a single tree.
#[derive(Debug, Clone)]
pub struct ModularReducer {
	field: FieldSpec,
	input_width: usize,
}

impl ModularReducer {
	pub fn new(field: FieldSpec, input_width: usize) -> Result<Self, Error> {
		ensure_width(input_width)?;
		if input_width < field.degree() {
			return Err(ContractViolation::ReductionInputTooNarrow {
				input_width,
				degree: field.degree(),
			}
			.into());
		}
		Ok(Self { field, input_width })
	}

	/// `(i, x^i mod h)` for every input bit `i` at or above the modulus degree.
	pub fn remainders(&self) -> Vec<(usize, Polynomial)> {
		(self.field.degree()..self.input_width)
			.map(|i| (i, self.field.reduce(&Polynomial::monomial(i))))
			.collect()
	}

	fn vectors(&self) -> Vec<Expr> {
		let degree = self.field.degree();
		let mut vectors: Vec<Expr> = self
			.remainders()
			.into_iter()
			.map(|(index, remainder)| {
				Expr::mux(
					Expr::Bit {
						signal: INPUT_PORT.into(),
						index,
					},
					Expr::constant(degree, remainder),
					Expr::constant(degree, Polynomial::zero()),
				)
			})
			.collect();
		vectors.push(Expr::Slice {
			signal: INPUT_PORT.into(),
			range: BitRange::new(0, degree),
		});
		vectors
	}
}

impl Generator for ModularReducer {
	fn shape(&self) -> CircuitShape {
		CircuitShape::ModReduce {
			field: self.field.clone(),
			input_width: self.input_width,
		}
	}

	fn ports(&self) -> Vec<Port> {
		data_ports(INPUT_PORT, self.input_width, OUTPUT_PORT, self.output_width())
	}

	fn input_width(&self) -> usize {
		self.input_width
	}

	fn output_width(&self) -> usize {
		self.field.degree()
	}

	fn build(&self, session: &mut GenerationSession) -> Result<Netlist, Error> {
		let mut netlist = Netlist::new();
		let reduced = reduce_vectors(&mut netlist, session, self.vectors(), self.output_width())?;
		netlist.assign(OUTPUT_PORT, Expr::signal(reduced));
		Ok(netlist)
	}

	fn harness(&self, rng: &mut StdRng, _config: &GenerationConfig) -> TestHarness {
		let y = Polynomial::random(rng, self.input_width);
		let expected = self.field.reduce(&y);

		TestHarness {
			drives: vec![Drive {
				port: INPUT_PORT.into(),
				width: self.input_width,
				value: StimulusValue::Scalar(y),
			}],
			expected: Expectation {
				port: OUTPUT_PORT.into(),
				width: self.output_width(),
				value: expected,
			},
			clocking: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	fn field_285() -> FieldSpec {
		FieldSpec::new(Polynomial::from(285)).unwrap()
	}

	#[test]
	fn test_remainders_for_aes_field() {
		let reducer = ModularReducer::new(field_285(), 12).unwrap();
		let remainders = reducer.remainders();
		let indices: Vec<_> = remainders.iter().map(|(i, _)| *i).collect();
		assert_eq!(indices, vec![8, 9, 10, 11]);
		// x^8 = x^4 + x^3 + x^2 + 1 mod h
		assert_eq!(remainders[0].1, Polynomial::from(0x1d));
		assert_eq!(remainders[1].1, Polynomial::from(0x3a));
		assert_eq!(reducer.vectors().len(), 5);
	}

	#[test]
	fn test_input_as_wide_as_degree_has_only_low_bits() {
		let reducer = ModularReducer::new(field_285(), 8).unwrap();
		assert!(reducer.remainders().is_empty());
		assert_eq!(
			reducer.vectors(),
			vec![Expr::Slice {
				signal: INPUT_PORT.into(),
				range: BitRange::new(0, 8)
			}]
		);
	}

	#[test]
	fn test_rejects_narrow_input() {
		assert_matches!(
			ModularReducer::new(field_285(), 7),
			Err(Error::ContractViolation(ContractViolation::ReductionInputTooNarrow {
				input_width: 7,
				degree: 8
			}))
		);
		assert_matches!(
			ModularReducer::new(field_285(), 0),
			Err(Error::ContractViolation(ContractViolation::ZeroWidth))
		);
	}
}
