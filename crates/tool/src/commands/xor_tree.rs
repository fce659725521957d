// Copyright 2026 The Binius Developers
use anyhow::Result;
use clap::Args;
use gf2e_frontend::CircuitShape;

use crate::{GeneratorCommand, params};

pub struct XorTreeCommand;

#[derive(Args, Debug, Clone)]
pub struct Params {
	/// Number of input vectors.
	#[arg(value_parser = params::positive_width)]
	pub vectors: usize,

	/// Bit width of each vector.
	#[arg(value_parser = params::positive_width)]
	pub width: usize,
}

impl GeneratorCommand for XorTreeCommand {
	type Params = Params;

	fn shape(params: &Params) -> Result<CircuitShape> {
		Ok(CircuitShape::XorTree {
			vectors: params.vectors,
			width: params.width,
		})
	}

	fn param_summary(params: &Params) -> Option<String> {
		Some(format!("{} vectors of {} bits", params.vectors, params.width))
	}
}
