// Copyright 2026 The Binius Developers
use gf2e_field::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Field(#[from] FieldError),
	#[error("contract violation: {0}")]
	ContractViolation(#[from] ContractViolation),
	/// Two requests resolved to the same module but disagree on its contents. This points at a
	/// generator bug (non-determinism) or at two different shapes sharing a module name.
	#[error("shape collision on module {name}: {reason}")]
	ShapeCollision { name: String, reason: String },
	#[error("no module named {0} in this session")]
	UnknownModule(String),
	#[error(transparent)]
	Simulation(#[from] SimulationError),
}

/// Parameters a generator refuses before producing anything.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContractViolation {
	#[error("an XOR reduction network needs at least one input vector")]
	EmptyXorTree,
	#[error("bit widths must be positive")]
	ZeroWidth,
	#[error("reduction input of {input_width} bits is narrower than the modulus degree {degree}")]
	ReductionInputTooNarrow { input_width: usize, degree: usize },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SimulationError {
	#[error("{module}: input port {port} was not driven")]
	MissingInput { module: String, port: String },
	#[error("{module}: no signal named {signal}")]
	UnknownSignal { module: String, signal: String },
	#[error("{module}: signal {signal} has no driver")]
	Undriven { module: String, signal: String },
	#[error("{module}: combinational loop through {signal}")]
	CombinationalLoop { module: String, signal: String },
	#[error("{module}: register {register} read before reset")]
	UninitializedRegister { module: String, register: String },
}
