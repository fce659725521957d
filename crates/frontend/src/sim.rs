// Copyright 2026 The Binius Developers
//! Bit-exact evaluation of generated netlists.
//!
//! Signals are resolved on demand and memoized per evaluation, so declaration order does not
//! matter and a combinational loop is reported instead of recursing forever. Sub-module instances
//! are evaluated recursively through the session that owns them.

use gf2e_field::Polynomial;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument};

use crate::{
	error::{Error, SimulationError},
	module::{Direction, GeneratedModule},
	netlist::{Expr, Instance},
	session::GenerationSession,
};

pub type SignalValues = FxHashMap<String, Polynomial>;

#[derive(Debug, Clone, Copy)]
pub struct Simulator<'s> {
	session: &'s GenerationSession,
}

impl<'s> Simulator<'s> {
	pub fn new(session: &'s GenerationSession) -> Self {
		Self { session }
	}

	fn module(&self, name: &str) -> Result<&'s GeneratedModule, Error> {
		self.session
			.module(name)
			.ok_or_else(|| Error::UnknownModule(name.to_string()))
	}

	/// Evaluates a combinational module and returns the value of every output port.
	pub fn evaluate(
		&self,
		module: &str,
		inputs: &[(&str, Polynomial)],
	) -> Result<SignalValues, Error> {
		let module = self.module(module)?;
		Frame::new(*self, module, inputs, std::iter::empty::<(&str, &Polynomial)>()).outputs()
	}

	/// Starts a clocked run of `module` with every register uninitialized.
	pub fn sequential(&self, module: &str) -> Result<SequentialRun<'s>, Error> {
		let module = self.module(module)?;
		Ok(SequentialRun {
			sim: *self,
			module,
			state: module
				.netlist
				.registers()
				.map(|register| (register.name.clone(), None))
				.collect(),
		})
	}

	/// Replays the module's own harness and reports the value it produced.
	#[instrument(skip(self), level = "debug")]
	pub fn verify(&self, module: &str) -> Result<Verification, Error> {
		let generated = self.module(module)?;
		let harness = &generated.harness;
		let mut inputs: Vec<(&str, Polynomial)> = harness
			.drives
			.iter()
			.map(|drive| (drive.port.as_str(), drive.value.packed()))
			.collect();

		let outputs = match &harness.clocking {
			None => self.evaluate(module, &inputs)?,
			Some(clocking) => {
				let mut run = self.sequential(module)?;
				inputs.push((clocking.reset.as_str(), Polynomial::one()));
				inputs.push((clocking.enable.as_str(), Polynomial::zero()));
				run.clock(&inputs)?;

				let stepping = inputs.len() - 2;
				inputs[stepping].1 = Polynomial::zero();
				inputs[stepping + 1].1 = Polynomial::one();
				for _ in 0..clocking.cycles {
					run.clock(&inputs)?;
				}
				run.outputs(&inputs)?
			}
		};

		let actual = outputs
			.get(&harness.expected.port)
			.cloned()
			.ok_or_else(|| SimulationError::UnknownSignal {
				module: module.to_string(),
				signal: harness.expected.port.clone(),
			})?;
		let verification = Verification {
			module: module.to_string(),
			expected: harness.expected.value.clone(),
			actual,
		};
		debug!(passed = verification.passed(), "harness replayed");
		Ok(verification)
	}

	/// Verifies every module of the session in emission order.
	pub fn verify_all(&self) -> Result<Vec<Verification>, Error> {
		self.session
			.modules()
			.map(|module| self.verify(&module.name))
			.collect()
	}
}

/// Outcome of replaying one harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
	pub module: String,
	pub expected: Polynomial,
	pub actual: Polynomial,
}

impl Verification {
	pub fn passed(&self) -> bool {
		self.expected == self.actual
	}
}

/// A module stepped clock by clock. Registers update together on each edge.
#[derive(Debug)]
pub struct SequentialRun<'s> {
	sim: Simulator<'s>,
	module: &'s GeneratedModule,
	state: FxHashMap<String, Option<Polynomial>>,
}

impl<'s> SequentialRun<'s> {
	fn frame(&self, inputs: &[(&str, Polynomial)]) -> Frame<'s> {
		let registers = self
			.state
			.iter()
			.filter_map(|(name, value)| value.as_ref().map(|value| (name.as_str(), value)));
		Frame::new(self.sim, self.module, inputs, registers)
	}

	/// One rising edge: reset loads the reset value, otherwise enable loads the next state.
	pub fn clock(&mut self, inputs: &[(&str, Polynomial)]) -> Result<(), Error> {
		let mut frame = self.frame(inputs);
		let mut updates = Vec::new();
		for register in self.module.netlist.registers() {
			let next = if !frame.value(&register.reset)?.is_zero() {
				Some(frame.value(&register.reset_value)?)
			} else if !frame.value(&register.enable)?.is_zero() {
				Some(frame.value(&register.next)?)
			} else {
				None
			};
			if let Some(next) = next {
				updates.push((register.name.clone(), next.truncate(register.width)));
			}
		}

		for (name, value) in updates {
			self.state.insert(name, Some(value));
		}
		Ok(())
	}

	/// Output ports for the current register state.
	pub fn outputs(&self, inputs: &[(&str, Polynomial)]) -> Result<SignalValues, Error> {
		self.frame(inputs).outputs()
	}

	pub fn register(&self, name: &str) -> Option<&Polynomial> {
		self.state.get(name).and_then(Option::as_ref)
	}
}

enum Driver<'m> {
	Assigns,
	Instance { instance: &'m Instance, port: &'m str },
}

/// Signal values of one module during one evaluation.
struct Frame<'m> {
	sim: Simulator<'m>,
	module: &'m GeneratedModule,
	values: SignalValues,
	pending: FxHashSet<String>,
	instance_outputs: FxHashMap<String, SignalValues>,
}

impl<'m> Frame<'m> {
	fn new<'v>(
		sim: Simulator<'m>,
		module: &'m GeneratedModule,
		inputs: &[(&str, Polynomial)],
		registers: impl Iterator<Item = (&'v str, &'v Polynomial)>,
	) -> Self {
		let mut values = SignalValues::default();
		for (port, value) in inputs {
			if let Some(port) = module.port(port) {
				values.insert(port.name.clone(), value.truncate(port.width));
			}
		}
		for (name, value) in registers {
			values.insert(name.to_string(), value.clone());
		}

		Self {
			sim,
			module,
			values,
			pending: FxHashSet::default(),
			instance_outputs: FxHashMap::default(),
		}
	}

	fn error(&self, build: impl FnOnce(String) -> SimulationError) -> Error {
		build(self.module.name.clone()).into()
	}

	fn outputs(mut self) -> Result<SignalValues, Error> {
		let module = self.module;
		module
			.outputs()
			.map(|port| Ok((port.name.clone(), self.value(&port.name)?)))
			.collect()
	}

	fn driver(&self, signal: &str) -> Result<Driver<'m>, Error> {
		let module = self.module;
		if module.netlist.assigns().any(|assign| assign.target == signal) {
			return Ok(Driver::Assigns);
		}
		for instance in module.netlist.instances() {
			for (port, local) in &instance.connections {
				if local != signal {
					continue;
				}
				let child = self.sim.module(&instance.module)?;
				if child
					.port(port)
					.is_some_and(|port| port.direction == Direction::Output)
				{
					return Ok(Driver::Instance { instance, port });
				}
			}
		}
		Err(self.error(|module| SimulationError::Undriven {
			module,
			signal: signal.to_string(),
		}))
	}

	fn value(&mut self, signal: &str) -> Result<Polynomial, Error> {
		if let Some(value) = self.values.get(signal) {
			return Ok(value.clone());
		}
		let module = self.module;
		if module
			.port(signal)
			.is_some_and(|port| port.direction == Direction::Input)
		{
			return Err(self.error(|module| SimulationError::MissingInput {
				module,
				port: signal.to_string(),
			}));
		}
		if module.netlist.registers().any(|register| register.name == signal) {
			return Err(self.error(|module| SimulationError::UninitializedRegister {
				module,
				register: signal.to_string(),
			}));
		}
		let Some(width) = module.signal_width(signal) else {
			return Err(self.error(|module| SimulationError::UnknownSignal {
				module,
				signal: signal.to_string(),
			}));
		};
		if !self.pending.insert(signal.to_string()) {
			return Err(self.error(|module| SimulationError::CombinationalLoop {
				module,
				signal: signal.to_string(),
			}));
		}

		let value = match self.driver(signal)? {
			Driver::Assigns => {
				let mut value = Polynomial::zero();
				for assign in module.netlist.assigns().filter(|a| a.target == signal) {
					value ^= &match assign.range {
						Some(range) => &self.eval(&assign.expr, range.width)? << range.lsb,
						None => self.eval(&assign.expr, width)?,
					};
				}
				value
			}
			Driver::Instance { instance, port } => self
				.instance(instance)?
				.get(port)
				.cloned()
				.unwrap_or_default(),
		}
		.truncate(width);

		self.pending.remove(signal);
		self.values.insert(signal.to_string(), value.clone());
		Ok(value)
	}

	fn instance(&mut self, instance: &'m Instance) -> Result<&SignalValues, Error> {
		if !self.instance_outputs.contains_key(&instance.name) {
			let child = self.sim.module(&instance.module)?;
			let mut inputs = Vec::new();
			for (port, local) in &instance.connections {
				if child
					.port(port)
					.is_some_and(|port| port.direction == Direction::Input)
				{
					inputs.push((port.as_str(), self.value(local)?));
				}
			}
			let outputs = self.sim.evaluate(&instance.module, &inputs)?;
			self.instance_outputs.insert(instance.name.clone(), outputs);
		}
		Ok(&self.instance_outputs[&instance.name])
	}

	/// Value of `expr` sized to a `width`-bit target.
	fn eval(&mut self, expr: &Expr, width: usize) -> Result<Polynomial, Error> {
		let value = match expr {
			Expr::Signal(signal) => self.value(signal)?,
			Expr::Slice { signal, range } => self.value(signal)?.slice(range.lsb, range.width),
			Expr::Bit { signal, index } => {
				Polynomial::from(u64::from(self.value(signal)?.bit(*index)))
			}
			Expr::Const { width, value } => value.truncate(*width),
			Expr::ShiftLeft { signal, amount } => &self.value(signal)? << *amount,
			Expr::Xor(lhs, rhs) => self.eval(lhs, width)? ^ self.eval(rhs, width)?,
			Expr::Mux {
				select,
				then,
				otherwise,
			} => {
				if self.eval(select, width)?.is_zero() {
					self.eval(otherwise, width)?
				} else {
					self.eval(then, width)?
				}
			}
		};
		Ok(value.truncate(width))
	}
}
