// Copyright 2026 The Binius Developers
use anyhow::Result;
use gf2e_tool::{Cli, commands::ModReduceCommand};

fn main() -> Result<()> {
	Cli::<ModReduceCommand>::new("gf2_poly_mod")
		.about("Generates a reducer computing y(x) mod h(x) for a B-bit input")
		.run()
}
