// Copyright 2026 The Binius Developers
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use gf2e_field::{AffineSpec, FieldSpec, Polynomial};
use gf2e_frontend::{CircuitShape, DEFAULT_PRNG_CYCLES, GenerationConfig, GenerationSession};
use gf2e_verilog::PrngProject;
use tracing::{info, warn};

use crate::{GeneratorCommand, params};

pub struct PrngCommand;

#[derive(Args, Debug, Clone)]
pub struct Params {
	/// Multiplier a(x), non-zero.
	#[arg(value_parser = params::nonzero_polynomial)]
	pub a: Polynomial,

	/// Additive constant c(x).
	#[arg(value_parser = params::polynomial)]
	pub c: Polynomial,

	/// Irreducible polynomial h(x) defining GF(2^e).
	#[arg(value_parser = params::modulus)]
	pub h: FieldSpec,

	/// Simulation template directory, copied to `modelsim/` in the project.
	#[arg(long)]
	pub template_dir: Option<PathBuf>,

	/// License file copied to the project root.
	#[arg(long)]
	pub license: Option<PathBuf>,

	/// Clock cycles the testbench runs before checking the output.
	#[arg(long, default_value_t = DEFAULT_PRNG_CYCLES)]
	pub cycles: usize,
}

impl Params {
	/// The recurrence constants reduced into the field.
	pub fn affine(&self) -> AffineSpec {
		AffineSpec::new(self.a.clone(), self.c.clone()).reduced(&self.h)
	}

	fn project(&self) -> PrngProject {
		let mut project = PrngProject::new(self.affine(), self.h.clone());
		if let Some(dir) = &self.template_dir {
			project = project.with_template_dir(dir);
		}
		if let Some(license) = &self.license {
			project = project.with_license(license);
		}
		project
	}
}

impl GeneratorCommand for PrngCommand {
	type Params = Params;

	fn shape(params: &Params) -> Result<CircuitShape> {
		let affine = params.affine();
		if affine.is_degenerate(&params.h) {
			warn!(
				a = %params.a,
				h = %params.h.modulus(),
				"a(x) is divisible by h(x); the generator will output c(x) forever"
			);
		}
		Ok(CircuitShape::Prng {
			affine,
			field: params.h.clone(),
		})
	}

	fn param_summary(params: &Params) -> Option<String> {
		let affine = params.affine();
		Some(format!(
			"GF(2^{}): x_(n+1) = ({})·x_n + ({}) mod ({})",
			params.h.degree(),
			affine.a,
			affine.c,
			params.h.modulus()
		))
	}

	fn config(params: &Params, random_seed: u64) -> GenerationConfig {
		GenerationConfig {
			random_seed,
			prng_cycles: params.cycles,
		}
	}

	fn write(params: &Params, session: &GenerationSession, dir: &Path) -> Result<()> {
		let project_dir = params.project().write(session, dir)?;
		info!("PRNG project ready in {}", project_dir.display());
		Ok(())
	}
}
