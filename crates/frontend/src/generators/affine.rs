// Copyright 2026 The Binius Developers
use gf2e_field::{AffineSpec, Polynomial};
use rand::rngs::StdRng;

use super::{Generator, data_ports, ensure_width, reduce_vectors};
use crate::{
	config::GenerationConfig,
	error::Error,
	module::{Drive, Expectation, Port, StimulusValue, TestHarness},
	netlist::{Expr, Netlist},
	session::GenerationSession,
	shape::CircuitShape,
};

pub const INPUT_PORT: &str = "in_poly";
pub const OUTPUT_PORT: &str = "out_poly";

/// `a(x)·p(x) + c(x)` as one shifted copy of `p` per set exponent of `a`, plus `c` itself when it
/// is non-zero, reduced by a single XOR tree.
#[derive(Debug, Clone)]
pub struct AffineTransform {
	affine: AffineSpec,
	input_width: usize,
}

impl AffineTransform {
	pub fn new(affine: AffineSpec, input_width: usize) -> Result<Self, Error> {
		ensure_width(input_width)?;
		Ok(Self {
			affine,
			input_width,
		})
	}

	/// Exponents of `a`, highest first; one shifted input copy each.
	pub fn shifts(&self) -> Vec<usize> {
		let mut shifts = self.affine.a.bit_positions();
		shifts.reverse();
		shifts
	}

	/// Number of vectors fed into the XOR tree.
	pub fn vector_count(&self) -> usize {
		let shifts = self.affine.a.bit_positions().len();
		let constant = usize::from(!self.affine.c.is_zero());
		(shifts + constant).max(1)
	}

	fn vectors(&self) -> Vec<Expr> {
		let width = self.output_width();
		let mut vectors: Vec<Expr> = self
			.shifts()
			.into_iter()
			.map(|amount| match amount {
				0 => Expr::signal(INPUT_PORT),
				amount => Expr::ShiftLeft {
					signal: INPUT_PORT.into(),
					amount,
				},
			})
			.collect();
		if !self.affine.c.is_zero() {
			vectors.push(Expr::constant(width, self.affine.c.clone()));
		}
		// a = 0 and c = 0: the product is zero, still reduced by a one-input tree.
		if vectors.is_empty() {
			vectors.push(Expr::constant(width, Polynomial::zero()));
		}
		vectors
	}
}

impl Generator for AffineTransform {
	fn shape(&self) -> CircuitShape {
		CircuitShape::Affine {
			affine: self.affine.clone(),
			input_width: self.input_width,
		}
	}

	fn ports(&self) -> Vec<Port> {
		data_ports(INPUT_PORT, self.input_width, OUTPUT_PORT, self.output_width())
	}

	fn input_width(&self) -> usize {
		self.input_width
	}

	/// `degree(a) + b`, widened to hold `c` when the constant is longer than the product.
	fn output_width(&self) -> usize {
		let product = self
			.affine
			.a
			.degree()
			.map_or(self.input_width, |degree| degree + self.input_width);
		product.max(self.affine.c.bit_len())
	}

	fn build(&self, session: &mut GenerationSession) -> Result<Netlist, Error> {
		let mut netlist = Netlist::new();
		let reduced = reduce_vectors(&mut netlist, session, self.vectors(), self.output_width())?;
		netlist.assign(OUTPUT_PORT, Expr::signal(reduced));
		Ok(netlist)
	}

	fn harness(&self, rng: &mut StdRng, _config: &GenerationConfig) -> TestHarness {
		let p = Polynomial::random(rng, self.input_width);
		let expected = self.affine.apply(&p);

		TestHarness {
			drives: vec![Drive {
				port: INPUT_PORT.into(),
				width: self.input_width,
				value: StimulusValue::Scalar(p),
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
