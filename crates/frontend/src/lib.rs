// Copyright 2026 The Binius Developers
//! Hierarchical generator for GF(2) arithmetic circuits.
//!
//! A request names a [`CircuitShape`]. The [`GenerationSession`] builds it by recursively
//! requesting the smaller shapes it is made of (XOR reduction trees, affine transforms, modular
//! reducers), so every distinct shape is generated exactly once per session. Each
//! [`GeneratedModule`] carries a structural [`Netlist`] and a self-checking [`TestHarness`] whose
//! golden value comes from the polynomial arithmetic in [`gf2e_field`].
//!
//! The [`Simulator`] evaluates the netlists bit-exactly, which is how harnesses are checked
//! without an external HDL simulator.

mod config;
mod error;
pub mod generators;
mod module;
pub mod netlist;
mod session;
mod shape;
mod sim;

pub use config::{DEFAULT_PRNG_CYCLES, DEFAULT_RANDOM_SEED, GenerationConfig};
pub use error::{ContractViolation, Error, SimulationError};
pub use module::{
	Clocking, Direction, Drive, Expectation, GeneratedModule, ModuleHandle, Port, StimulusValue,
	TestHarness,
};
pub use netlist::Netlist;
pub use session::GenerationSession;
pub use shape::CircuitShape;
pub use sim::{SequentialRun, SignalValues, Simulator, Verification};
