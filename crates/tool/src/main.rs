// Copyright 2026 The Binius Developers
use anyhow::Result;
use gf2e_tool::{Cli, commands::PrngCommand};

fn main() -> Result<()> {
	Cli::<PrngCommand>::new("gf2e-prng")
		.about("Generates a Verilog PRNG over GF(2^e) from x_(n+1) = a·x_n + c mod h")
		.run()
}
