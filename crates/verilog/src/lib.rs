// Copyright 2026 The Binius Developers
//! Verilog-2001 output for generation sessions.
//!
//! [`render_module`] and [`render_testbench`] turn one [`GeneratedModule`] into source text.
//! [`ArtifactWriter`] lays a whole session out as `src/<name>.v` and `tb/tb_<name>.v`, and
//! [`PrngProject`] wraps that layout into a standalone PRNG project directory.
//!
//! [`GeneratedModule`]: gf2e_frontend::GeneratedModule

mod error;
mod project;
mod render;
mod writer;

pub use error::WriteError;
pub use project::PrngProject;
pub use render::{render_module, render_testbench};
pub use writer::{Artifact, ArtifactWriter};
