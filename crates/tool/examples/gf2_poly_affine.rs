// Copyright 2026 The Binius Developers
use anyhow::Result;
use gf2e_tool::{Cli, commands::AffineCommand};

fn main() -> Result<()> {
	Cli::<AffineCommand>::new("gf2_poly_affine")
		.about("Generates a(x)·p(x) + c(x) over GF(2) for a B-bit input")
		.run()
}
