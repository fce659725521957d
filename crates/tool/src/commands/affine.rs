// Copyright 2026 The Binius Developers
use anyhow::Result;
use clap::Args;
use gf2e_field::{AffineSpec, Polynomial};
use gf2e_frontend::CircuitShape;

use crate::{GeneratorCommand, params};

pub struct AffineCommand;

#[derive(Args, Debug, Clone)]
pub struct Params {
	/// Multiplier a(x), non-zero.
	#[arg(value_parser = params::nonzero_polynomial)]
	pub a: Polynomial,

	/// Additive constant c(x).
	#[arg(value_parser = params::polynomial)]
	pub c: Polynomial,

	/// Bit width of the input polynomial.
	#[arg(value_parser = params::positive_width)]
	pub width: usize,
}

impl GeneratorCommand for AffineCommand {
	type Params = Params;

	fn shape(params: &Params) -> Result<CircuitShape> {
		Ok(CircuitShape::Affine {
			affine: AffineSpec::new(params.a.clone(), params.c.clone()),
			input_width: params.width,
		})
	}

	fn param_summary(params: &Params) -> Option<String> {
		Some(format!(
			"a(x) = {}, c(x) = {}, {} input bits",
			params.a, params.c, params.width
		))
	}
}
