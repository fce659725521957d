// Copyright 2026 The Binius Developers
use gf2e_field::{AffineSpec, FieldSpec, Polynomial};
use rand::rngs::StdRng;

use super::{Generator, data_ports, ensure_width};
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

/// `a(x)·p(x) + c(x) mod h(x)`: an affine transform feeding a modular reducer.
#[derive(Debug, Clone)]
pub struct AffineModularComposer {
	affine: AffineSpec,
	field: FieldSpec,
	input_width: usize,
}

impl AffineModularComposer {
	pub fn new(affine: AffineSpec, field: FieldSpec, input_width: usize) -> Result<Self, Error> {
		ensure_width(input_width)?;
		Ok(Self {
			affine,
			field,
			input_width,
		})
	}

	fn affine_shape(&self) -> CircuitShape {
		CircuitShape::Affine {
			affine: self.affine.clone(),
			input_width: self.input_width,
		}
	}

	/// Input width of the reducer: the affine output, zero-extended to at least the field degree.
	pub fn reduction_width(&self, affine_width: usize) -> usize {
		affine_width.max(self.field.degree())
	}
}

impl Generator for AffineModularComposer {
	fn shape(&self) -> CircuitShape {
		CircuitShape::AffineMod {
			affine: self.affine.clone(),
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
		let affine = session.request(&self.affine_shape())?;
		let reduction_width = self.reduction_width(affine.output_width);
		let reducer = session.request(&CircuitShape::ModReduce {
			field: self.field.clone(),
			input_width: reduction_width,
		})?;

		let mut netlist = Netlist::new();
		let in_affine = netlist.wire("w_in_affine", affine.input_width);
		let out_affine = netlist.wire("w_out_affine", affine.output_width);
		let in_mod = netlist.wire("w_in_mod", reducer.input_width);
		let out_mod = netlist.wire("w_out_mod", reducer.output_width);

		netlist.comment("Affine transform");
		netlist.assign(&in_affine, Expr::signal(INPUT_PORT));
		netlist.instance(
			&affine.name,
			affine.instance_name(),
			&[("in_poly", in_affine.as_str()), ("out_poly", out_affine.as_str())],
		);

		netlist.comment("Modular reduction");
		netlist.assign(&in_mod, Expr::signal(&out_affine));
		netlist.instance(
			&reducer.name,
			reducer.instance_name(),
			&[("in_poly", in_mod.as_str()), ("out_poly", out_mod.as_str())],
		);

		netlist.assign(OUTPUT_PORT, Expr::signal(out_mod));
		Ok(netlist)
	}

	fn harness(&self, rng: &mut StdRng, _config: &GenerationConfig) -> TestHarness {
		let p = Polynomial::random(rng, self.input_width);
		let expected = self.affine.apply_mod(&p, &self.field);

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
