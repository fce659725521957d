// Copyright 2026 The Binius Developers
use anyhow::Result;
use gf2e_tool::{Cli, commands::AffineModCommand};

fn main() -> Result<()> {
	Cli::<AffineModCommand>::new("gf2_poly_affine_mod")
		.about("Generates a(x)·p(x) + c(x) mod h(x) for a B-bit input")
		.run()
}
