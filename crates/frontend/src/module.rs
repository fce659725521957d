// Copyright 2026 The Binius Developers
use gf2e_field::Polynomial;

use crate::{netlist::Netlist, shape::CircuitShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Input,
	Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
	pub name: String,
	pub direction: Direction,
	pub width: usize,
}

impl Port {
	pub fn input(name: impl Into<String>, width: usize) -> Self {
		Self {
			name: name.into(),
			direction: Direction::Input,
			width,
		}
	}

	pub fn output(name: impl Into<String>, width: usize) -> Self {
		Self {
			name: name.into(),
			direction: Direction::Output,
			width,
		}
	}
}

/// Value applied to one input port by a test harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StimulusValue {
	Scalar(Polynomial),
	/// Equal-width values packed into one bus, the first value in the lowest lane.
	Vectors {
		width: usize,
		values: Vec<Polynomial>,
	},
}

impl StimulusValue {
	pub fn packed(&self) -> Polynomial {
		match self {
			Self::Scalar(value) => value.clone(),
			Self::Vectors { width, values } => Polynomial::pack(values, *width),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drive {
	pub port: String,
	pub width: usize,
	pub value: StimulusValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
	pub port: String,
	pub width: usize,
	pub value: Polynomial,
}

/// Clock protocol of a sequential harness: one cycle with reset asserted, then `cycles` cycles
/// with enable asserted, after which the output is compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clocking {
	pub clock: String,
	pub reset: String,
	pub enable: String,
	pub cycles: usize,
}

/// One random stimulus and the golden value the module must produce for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestHarness {
	pub drives: Vec<Drive>,
	pub expected: Expectation,
	pub clocking: Option<Clocking>,
}

/// Name and data widths of a generated module, as seen by the module that instantiates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
	pub name: String,
	pub input_width: usize,
	pub output_width: usize,
}

impl ModuleHandle {
	/// Upper-case instance name used when the module is instantiated once in a parent.
	pub fn instance_name(&self) -> String {
		self.name.to_uppercase()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
	pub name: String,
	pub shape: CircuitShape,
	pub ports: Vec<Port>,
	pub input_width: usize,
	pub output_width: usize,
	pub netlist: Netlist,
	pub harness: TestHarness,
}

impl GeneratedModule {
	pub fn handle(&self) -> ModuleHandle {
		ModuleHandle {
			name: self.name.clone(),
			input_width: self.input_width,
			output_width: self.output_width,
		}
	}

	pub fn port(&self, name: &str) -> Option<&Port> {
		self.ports.iter().find(|port| port.name == name)
	}

	pub fn inputs(&self) -> impl Iterator<Item = &Port> {
		self.ports
			.iter()
			.filter(|port| port.direction == Direction::Input)
	}

	pub fn outputs(&self) -> impl Iterator<Item = &Port> {
		self.ports
			.iter()
			.filter(|port| port.direction == Direction::Output)
	}

	/// Width of a port, wire or register declared in this module.
	pub fn signal_width(&self, name: &str) -> Option<usize> {
		self.port(name)
			.map(|port| port.width)
			.or_else(|| {
				self.netlist
					.wires()
					.find(|wire| wire.name == name)
					.map(|wire| wire.width)
			})
			.or_else(|| {
				self.netlist
					.registers()
					.find(|register| register.name == name)
					.map(|register| register.width)
			})
	}

	/// Names of the sub-modules this module instantiates.
	pub fn dependencies(&self) -> impl Iterator<Item = &str> {
		self.netlist
			.instances()
			.map(|instance| instance.module.as_str())
	}
}
