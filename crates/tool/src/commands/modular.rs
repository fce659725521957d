// Copyright 2026 The Binius Developers
use anyhow::Result;
use clap::Args;
use gf2e_field::FieldSpec;
use gf2e_frontend::CircuitShape;

use crate::{GeneratorCommand, params};

pub struct ModReduceCommand;

#[derive(Args, Debug, Clone)]
pub struct Params {
	/// Modulus h(x), degree at least 1.
	#[arg(value_parser = params::modulus)]
	pub h: FieldSpec,

	/// Bit width of the polynomial to reduce. Must be at least deg(h).
	#[arg(value_parser = params::positive_width)]
	pub width: usize,
}

impl GeneratorCommand for ModReduceCommand {
	type Params = Params;

	fn shape(params: &Params) -> Result<CircuitShape> {
		Ok(CircuitShape::ModReduce {
			field: params.h.clone(),
			input_width: params.width,
		})
	}

	fn param_summary(params: &Params) -> Option<String> {
		Some(format!("h(x) = {}, {} input bits", params.h.modulus(), params.width))
	}
}
