// Copyright 2026 The Binius Developers
use anyhow::Result;
use clap::Args;
use gf2e_field::{AffineSpec, FieldSpec, Polynomial};
use gf2e_frontend::CircuitShape;

use crate::{GeneratorCommand, params};

pub struct AffineModCommand;

#[derive(Args, Debug, Clone)]
pub struct Params {
	/// Multiplier a(x), non-zero.
	#[arg(value_parser = params::nonzero_polynomial)]
	pub a: Polynomial,

	/// Additive constant c(x).
	#[arg(value_parser = params::polynomial)]
	pub c: Polynomial,

	/// Modulus h(x), degree at least 1.
	#[arg(value_parser = params::modulus)]
	pub h: FieldSpec,

	/// Bit width of the input polynomial.
	#[arg(value_parser = params::positive_width)]
	pub width: usize,
}

impl GeneratorCommand for AffineModCommand {
	type Params = Params;

	fn shape(params: &Params) -> Result<CircuitShape> {
		Ok(CircuitShape::AffineMod {
			affine: AffineSpec::new(params.a.clone(), params.c.clone()),
			field: params.h.clone(),
			input_width: params.width,
		})
	}

	fn param_summary(params: &Params) -> Option<String> {
		Some(format!(
			"a(x) = {}, c(x) = {}, h(x) = {}, {} input bits",
			params.a,
			params.c,
			params.h.modulus(),
			params.width
		))
	}
}
