// Copyright 2026 The Binius Developers
use gf2e_field::{AffineSpec, FieldSpec, Polynomial};
use rand::rngs::StdRng;

use super::Generator;
use crate::{
	config::GenerationConfig,
	error::Error,
	module::{Clocking, Drive, Expectation, Port, StimulusValue, TestHarness},
	netlist::{Expr, Netlist, Register},
	session::GenerationSession,
	shape::CircuitShape,
};

pub const CLOCK_PORT: &str = "clk";
pub const RESET_PORT: &str = "rst";
pub const ENABLE_PORT: &str = "enable";
pub const SEED_PORT: &str = "seed";
pub const OUTPUT_PORT: &str = "prng_out";

/// Clocked recurrence `x_{n+1} = a(x)·x_n + c(x) mod h(x)` over `GF(2^D)`.
///
/// A `D`-bit state register loads the seed while reset is high and otherwise, when enabled, the
/// output of an affine-mod composer applied to the current state.
#[derive(Debug, Clone)]
pub struct SequentialPrng {
	affine: AffineSpec,
	field: FieldSpec,
}

impl SequentialPrng {
	pub fn new(affine: AffineSpec, field: FieldSpec) -> Self {
		Self { affine, field }
	}

	fn width(&self) -> usize {
		self.field.degree()
	}
}

impl Generator for SequentialPrng {
	fn shape(&self) -> CircuitShape {
		CircuitShape::Prng {
			affine: self.affine.clone(),
			field: self.field.clone(),
		}
	}

	fn ports(&self) -> Vec<Port> {
		vec![
			Port::input(CLOCK_PORT, 1),
			Port::input(RESET_PORT, 1),
			Port::input(ENABLE_PORT, 1),
			Port::input(SEED_PORT, self.width()),
			Port::output(OUTPUT_PORT, self.width()),
		]
	}

	fn input_width(&self) -> usize {
		self.width()
	}

	fn output_width(&self) -> usize {
		self.width()
	}

	fn build(&self, session: &mut GenerationSession) -> Result<Netlist, Error> {
		let step = session.request(&CircuitShape::AffineMod {
			affine: self.affine.clone(),
			field: self.field.clone(),
			input_width: self.width(),
		})?;

		let mut netlist = Netlist::new();
		let next = netlist.wire("next_state", step.output_width);
		netlist.register(Register {
			name: "state".into(),
			width: self.width(),
			clock: CLOCK_PORT.into(),
			reset: RESET_PORT.into(),
			reset_value: SEED_PORT.into(),
			enable: ENABLE_PORT.into(),
			next: next.clone(),
		});

		netlist.comment("Next state");
		netlist.instance(
			&step.name,
			step.instance_name(),
			&[("in_poly", "state"), ("out_poly", next.as_str())],
		);

		netlist.assign(OUTPUT_PORT, Expr::signal("state"));
		Ok(netlist)
	}

	fn harness(&self, rng: &mut StdRng, config: &GenerationConfig) -> TestHarness {
		let seed = Polynomial::random(rng, self.width());
		let expected = self.affine.iterate(&seed, &self.field, config.prng_cycles);

		TestHarness {
			drives: vec![Drive {
				port: SEED_PORT.into(),
				width: self.width(),
				value: StimulusValue::Scalar(seed),
			}],
			expected: Expectation {
				port: OUTPUT_PORT.into(),
				width: self.width(),
				value: expected,
			},
			clocking: Some(Clocking {
				clock: CLOCK_PORT.into(),
				reset: RESET_PORT.into(),
				enable: ENABLE_PORT.into(),
				cycles: config.prng_cycles,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;

	#[test]
	fn test_harness_runs_configured_cycles() {
		let field = FieldSpec::new(Polynomial::from(285)).unwrap();
		let affine = AffineSpec::new(Polynomial::from(23), Polynomial::from(5));
		let prng = SequentialPrng::new(affine.clone(), field.clone());
		let config = GenerationConfig {
			prng_cycles: 7,
			..Default::default()
		};

		let harness = prng.harness(&mut StdRng::seed_from_u64(1), &config);
		let seed = harness.drives[0].value.packed();
		assert_eq!(harness.clocking.unwrap().cycles, 7);
		assert_eq!(harness.expected.value, affine.iterate(&seed, &field, 7));
	}
}
