// Copyright 2026 The Binius Developers
use gf2e_field::Polynomial;
use rand::rngs::StdRng;

use super::{Generator, data_ports, ensure_width};
use crate::{
	config::GenerationConfig,
	error::{ContractViolation, Error},
	module::{Drive, Expectation, Port, StimulusValue, TestHarness},
	netlist::{BitRange, Expr, Netlist},
	session::GenerationSession,
	shape::CircuitShape,
};

pub const INPUT_PORT: &str = "in_vectors";
pub const OUTPUT_PORT: &str = "out_xor";

/// Balanced binary tree of pairwise XORs over `vectors` packed inputs of `width` bits.
///
/// Stage 0 slices the packed input into lanes. Every later stage XORs neighbours pairwise; an odd
/// element at the end of a stage is carried over unchanged.
#[derive(Debug, Clone)]
pub struct XorTree {
	vectors: usize,
	width: usize,
}

impl XorTree {
	pub fn new(vectors: usize, width: usize) -> Result<Self, Error> {
		if vectors == 0 {
			return Err(ContractViolation::EmptyXorTree.into());
		}
		ensure_width(width)?;
		Ok(Self { vectors, width })
	}

	/// Number of XOR stages, `ceil(log2 vectors)`.
	pub fn depth(&self) -> usize {
		self.vectors.next_power_of_two().trailing_zeros() as usize
	}
}

fn stage_wire(stage: usize, index: usize) -> String {
	format!("vec_{stage}_{index}")
}

impl Generator for XorTree {
	fn shape(&self) -> CircuitShape {
		CircuitShape::XorTree {
			vectors: self.vectors,
			width: self.width,
		}
	}

	fn ports(&self) -> Vec<Port> {
		data_ports(INPUT_PORT, self.input_width(), OUTPUT_PORT, self.width)
	}

	fn input_width(&self) -> usize {
		self.vectors * self.width
	}

	fn output_width(&self) -> usize {
		self.width
	}

	fn build(&self, _session: &mut GenerationSession) -> Result<Netlist, Error> {
		let mut netlist = Netlist::new();

		netlist.comment("Input lanes");
		let mut current: Vec<String> = (0..self.vectors)
			.map(|i| {
				let wire = netlist.wire(stage_wire(0, i), self.width);
				netlist.assign(
					&wire,
					Expr::Slice {
						signal: INPUT_PORT.into(),
						range: BitRange::lane(i, self.width),
					},
				);
				wire
			})
			.collect();

		let mut stage = 0;
		while current.len() > 1 {
			stage += 1;
			netlist.comment(format!("Tree stage {stage}"));
			current = current
				.chunks(2)
				.enumerate()
				.map(|(i, pair)| {
					let wire = netlist.wire(stage_wire(stage, i), self.width);
					let expr = match pair {
						[lhs, rhs] => Expr::xor(Expr::signal(lhs), Expr::signal(rhs)),
						[odd] => Expr::signal(odd),
						_ => unreachable!("chunks(2) yields one or two elements"),
					};
					netlist.assign(&wire, expr);
					wire
				})
				.collect();
		}

		netlist.assign(OUTPUT_PORT, Expr::signal(&current[0]));
		Ok(netlist)
	}

	fn harness(&self, rng: &mut StdRng, _config: &GenerationConfig) -> TestHarness {
		let values: Vec<Polynomial> = (0..self.vectors)
			.map(|_| Polynomial::random(rng, self.width))
			.collect();
		let expected = values
			.iter()
			.fold(Polynomial::zero(), |acc, value| acc ^ value);

		TestHarness {
			drives: vec![Drive {
				port: INPUT_PORT.into(),
				width: self.input_width(),
				value: StimulusValue::Vectors {
					width: self.width,
					values,
				},
			}],
			expected: Expectation {
				port: OUTPUT_PORT.into(),
				width: self.width,
				value: expected,
			},
			clocking: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use rstest::rstest;

	use super::*;
	use crate::netlist::Item;

	#[rstest]
	#[case(1, 0)]
	#[case(2, 1)]
	#[case(3, 2)]
	#[case(4, 2)]
	#[case(5, 3)]
	#[case(8, 3)]
	#[case(9, 4)]
	fn test_depth(#[case] vectors: usize, #[case] depth: usize) {
		assert_eq!(XorTree::new(vectors, 4).unwrap().depth(), depth);
	}

	#[test]
	fn test_rejects_empty_and_zero_width() {
		assert_matches!(
			XorTree::new(0, 8),
			Err(Error::ContractViolation(ContractViolation::EmptyXorTree))
		);
		assert_matches!(
			XorTree::new(3, 0),
			Err(Error::ContractViolation(ContractViolation::ZeroWidth))
		);
	}

	#[test]
	fn test_odd_element_is_passed_through() {
		let tree = XorTree::new(3, 4).unwrap();
		let netlist = tree.build(&mut GenerationSession::default()).unwrap();
		let pass_through = netlist
			.assigns()
			.find(|assign| assign.target == "vec_1_1")
			.unwrap();
		assert_eq!(pass_through.expr, Expr::signal("vec_0_2"));

		let stages = netlist
			.items()
			.iter()
			.filter(|item| matches!(item, Item::Comment(text) if text.starts_with("Tree stage")))
			.count();
		assert_eq!(stages, tree.depth());
	}

	#[test]
	fn test_single_vector_is_identity_wiring() {
		let netlist = XorTree::new(1, 6)
			.unwrap()
			.build(&mut GenerationSession::default())
			.unwrap();
		assert_eq!(netlist.wires().count(), 1);
		let last = netlist.assigns().last().unwrap();
		assert_eq!(last.target, OUTPUT_PORT);
		assert_eq!(last.expr, Expr::signal("vec_0_0"));
	}
}
