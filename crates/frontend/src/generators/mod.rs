// Copyright 2026 The Binius Developers
//! Builders for every [`CircuitShape`].
//!
//! A generator validates its parameters when it is constructed, so an invalid shape is rejected
//! before the session records anything. Building a netlist may request further shapes from the
//! session; those are generated first and therefore precede their parent in emission order.

mod affine;
mod affine_mod;
mod modular;
mod prng;
mod xor_tree;

pub use affine::AffineTransform;
pub use affine_mod::AffineModularComposer;
pub use modular::ModularReducer;
pub use prng::SequentialPrng;
pub use xor_tree::XorTree;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
	config::GenerationConfig,
	error::{ContractViolation, Error},
	module::{GeneratedModule, Port, TestHarness},
	netlist::{BitRange, Expr, Netlist},
	session::GenerationSession,
	shape::CircuitShape,
};

pub trait Generator {
	fn shape(&self) -> CircuitShape;

	fn ports(&self) -> Vec<Port>;

	/// Width of the data input, the one a parent drives.
	fn input_width(&self) -> usize;

	fn output_width(&self) -> usize;

	/// Builds the structural body, requesting sub-modules from `session` as needed.
	fn build(&self, session: &mut GenerationSession) -> Result<Netlist, Error>;

	/// Draws one random stimulus and computes the golden output for it in software.
	fn harness(&self, rng: &mut StdRng, config: &GenerationConfig) -> TestHarness;
}

/// Returns the generator for `shape`, or the contract its parameters violate.
pub fn for_shape(shape: &CircuitShape) -> Result<Box<dyn Generator>, Error> {
	Ok(match shape {
		CircuitShape::XorTree { vectors, width } => Box::new(XorTree::new(*vectors, *width)?),
		CircuitShape::Affine {
			affine,
			input_width,
		} => Box::new(AffineTransform::new(affine.clone(), *input_width)?),
		CircuitShape::ModReduce { field, input_width } => {
			Box::new(ModularReducer::new(field.clone(), *input_width)?)
		}
		CircuitShape::AffineMod {
			affine,
			field,
			input_width,
		} => Box::new(AffineModularComposer::new(affine.clone(), field.clone(), *input_width)?),
		CircuitShape::Prng { affine, field } => {
			Box::new(SequentialPrng::new(affine.clone(), field.clone()))
		}
	})
}

/// Runs `generator` to completion: body first, then a harness drawn from a freshly seeded RNG.
pub(crate) fn generate(
	generator: &dyn Generator,
	session: &mut GenerationSession,
) -> Result<GeneratedModule, Error> {
	let shape = generator.shape();
	let netlist = generator.build(session)?;
	let config = session.config();
	let mut rng = StdRng::seed_from_u64(config.random_seed);
	let harness = generator.harness(&mut rng, config);

	Ok(GeneratedModule {
		name: shape.module_name(),
		shape,
		ports: generator.ports(),
		input_width: generator.input_width(),
		output_width: generator.output_width(),
		netlist,
		harness,
	})
}

/// Shared by the combinational generators: one data input, one data output.
pub(crate) fn data_ports(
	input: &str,
	input_width: usize,
	output: &str,
	output_width: usize,
) -> Vec<Port> {
	vec![
		Port::input(input, input_width),
		Port::output(output, output_width),
	]
}

pub(crate) fn ensure_width(width: usize) -> Result<(), Error> {
	if width == 0 {
		return Err(ContractViolation::ZeroWidth.into());
	}
	Ok(())
}

/// Feeds `vectors`, each `width` bits, through one shared XOR tree and returns the wire holding
/// their XOR.
pub(crate) fn reduce_vectors(
	netlist: &mut Netlist,
	session: &mut GenerationSession,
	vectors: Vec<Expr>,
	width: usize,
) -> Result<String, Error> {
	let tree = session.request(&CircuitShape::XorTree {
		vectors: vectors.len(),
		width,
	})?;

	netlist.comment("Vectors to reduce");
	let packed = netlist.wire("w_in_vectors", tree.input_width);
	let reduced = netlist.wire("w_out_xor", tree.output_width);
	for (i, vector) in vectors.into_iter().enumerate() {
		netlist.assign_range(&packed, BitRange::lane(i, width), vector);
	}

	netlist.instance(
		&tree.name,
		tree.instance_name(),
		&[
			(xor_tree::INPUT_PORT, packed.as_str()),
			(xor_tree::OUTPUT_PORT, reduced.as_str()),
		],
	);
	Ok(reduced)
}
