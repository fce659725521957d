// Copyright 2026 The Binius Developers

/// Seed for harness stimulus; every generator invocation reseeds with it.
pub const DEFAULT_RANDOM_SEED: u64 = 42;
/// Clock cycles the PRNG harness runs before comparing against the software model.
pub const DEFAULT_PRNG_CYCLES: usize = 100;

/// Per-session settings that influence generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
	pub random_seed: u64,
	pub prng_cycles: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			random_seed: DEFAULT_RANDOM_SEED,
			prng_cycles: DEFAULT_PRNG_CYCLES,
		}
	}
}
