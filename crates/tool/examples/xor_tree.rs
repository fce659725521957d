// Copyright 2026 The Binius Developers
use anyhow::Result;
use gf2e_tool::{Cli, commands::XorTreeCommand};

fn main() -> Result<()> {
	Cli::<XorTreeCommand>::new("xor_tree")
		.about("Generates a balanced XOR reduction tree over N vectors of W bits")
		.run()
}
