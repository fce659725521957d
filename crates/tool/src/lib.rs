// Copyright 2026 The Binius Developers
//! Command-line front-ends for the GF(2) circuit generators.
//!
//! Each generator is exposed through a [`GeneratorCommand`], which maps its clap arguments to a
//! [`CircuitShape`]. [`Cli`] handles everything the commands share: argument parsing, logging,
//! the generation session, optional verification by simulation and writing the output tree.

pub mod commands;
pub mod params;

use std::{
	marker::PhantomData,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, CommandFactory, FromArgMatches, Parser};
use gf2e_frontend::{
	CircuitShape, DEFAULT_RANDOM_SEED, GenerationConfig, GenerationSession, Simulator,
};
use gf2e_verilog::ArtifactWriter;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// A generator reachable from the command line.
pub trait GeneratorCommand {
	type Params: Args;

	/// The shape to generate. Fails on parameters the generators would reject.
	fn shape(params: &Self::Params) -> Result<CircuitShape>;

	/// One-line description of the parameters for the log.
	fn param_summary(_params: &Self::Params) -> Option<String> {
		None
	}

	fn config(_params: &Self::Params, random_seed: u64) -> GenerationConfig {
		GenerationConfig {
			random_seed,
			..Default::default()
		}
	}

	/// Writes the finished session under `dir`.
	fn write(_params: &Self::Params, session: &GenerationSession, dir: &Path) -> Result<()> {
		ArtifactWriter::new(dir).write(session)?;
		Ok(())
	}
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
	/// Directory to save files.
	#[arg(short, long, default_value = ".")]
	pub dir: PathBuf,

	/// Seed for the random testbench stimulus.
	#[arg(long, default_value_t = DEFAULT_RANDOM_SEED)]
	pub seed: u64,

	/// Check every testbench against a simulation of the generated netlists before writing.
	#[arg(long)]
	pub verify: bool,
}

/// Full argument set of a command: its own parameters followed by [`CommonArgs`].
#[derive(Parser, Debug)]
pub struct CliArgs<P: Args> {
	#[command(flatten)]
	pub params: P,

	#[command(flatten)]
	pub common: CommonArgs,
}

pub struct Cli<G: GeneratorCommand> {
	name: &'static str,
	about: Option<&'static str>,
	_generator: PhantomData<G>,
}

impl<G: GeneratorCommand> Cli<G> {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			about: None,
			_generator: PhantomData,
		}
	}

	pub fn about(mut self, about: &'static str) -> Self {
		self.about = Some(about);
		self
	}

	/// Parses the process arguments and runs the command.
	pub fn run(self) -> Result<()> {
		init_tracing();
		let mut command = CliArgs::<G::Params>::command().name(self.name);
		if let Some(about) = self.about {
			command = command.about(about);
		}
		let matches = command.get_matches();
		let args = CliArgs::<G::Params>::from_arg_matches(&matches)?;
		execute::<G>(&args.params, &args.common)
	}
}

/// Generates, optionally verifies, and writes one command's output.
pub fn execute<G: GeneratorCommand>(params: &G::Params, common: &CommonArgs) -> Result<()> {
	let shape = G::shape(params)?;
	if let Some(summary) = G::param_summary(params) {
		info!("{summary}");
	}

	let mut session = GenerationSession::new(G::config(params, common.seed));
	let top = session
		.request(&shape)
		.with_context(|| format!("generating {shape}"))?;
	info!(top = %top.name, modules = session.len(), "generation complete");

	if common.verify {
		verify(&session)?;
	}

	G::write(params, &session, &common.dir)
		.with_context(|| format!("writing output to {}", common.dir.display()))
}

/// Replays every harness in simulation and fails if any output disagrees.
pub fn verify(session: &GenerationSession) -> Result<()> {
	let mut failed = 0;
	for verification in Simulator::new(session).verify_all()? {
		if verification.passed() {
			info!(module = %verification.module, "testbench passes in simulation");
		} else {
			warn!(
				module = %verification.module,
				expected = %verification.expected.as_biguint(),
				actual = %verification.actual.as_biguint(),
				"testbench fails in simulation"
			);
			failed += 1;
		}
	}
	if failed > 0 {
		bail!("{failed} testbench(es) failed in simulation");
	}
	Ok(())
}

/// Installs a stderr logger filtered by `RUST_LOG`, `info` by default.
pub fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_target(false).with_writer(std::io::stderr))
		.try_init();
}
