// Copyright 2026 The Binius Developers
use std::{
	fs,
	path::{Path, PathBuf},
};

use gf2e_frontend::GenerationSession;
use tracing::{info, instrument};

use crate::{
	error::WriteError,
	render::{render_module, render_testbench},
};

pub const SOURCE_DIR: &str = "src";
pub const TESTBENCH_DIR: &str = "tb";

/// One rendered file, with its path relative to the writer root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
	pub path: PathBuf,
	pub contents: String,
}

/// Lays out every module of a session as `src/<name>.v` plus `tb/tb_<name>.v` under one root.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
	root: PathBuf,
}

impl ArtifactWriter {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Renders the whole session in emission order without touching the filesystem.
	pub fn render(&self, session: &GenerationSession) -> Vec<Artifact> {
		session
			.modules()
			.flat_map(|module| {
				[
					Artifact {
						path: Path::new(SOURCE_DIR).join(format!("{}.v", module.name)),
						contents: render_module(module),
					},
					Artifact {
						path: Path::new(TESTBENCH_DIR).join(format!("tb_{}.v", module.name)),
						contents: render_testbench(module),
					},
				]
			})
			.collect()
	}

	/// Renders everything first, then writes it. Returns the written paths.
	#[instrument(skip_all, fields(root = %self.root.display()))]
	pub fn write(&self, session: &GenerationSession) -> Result<Vec<PathBuf>, WriteError> {
		let artifacts = self.render(session);
		for dir in [SOURCE_DIR, TESTBENCH_DIR] {
			create_dir(&self.root.join(dir))?;
		}

		let mut written = Vec::with_capacity(artifacts.len());
		for artifact in artifacts {
			let path = self.root.join(&artifact.path);
			write_file(&path, &artifact.contents)?;
			info!(path = %path.display(), "wrote artifact");
			written.push(path);
		}
		Ok(written)
	}
}

pub(crate) fn create_dir(path: &Path) -> Result<(), WriteError> {
	fs::create_dir_all(path).map_err(|source| WriteError::CreateDir {
		path: path.to_path_buf(),
		source,
	})
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
	fs::write(path, contents).map_err(|source| WriteError::Write {
		path: path.to_path_buf(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use gf2e_frontend::CircuitShape;

	use super::*;

	#[test]
	fn test_render_pairs_sources_with_testbenches() {
		let mut session = GenerationSession::default();
		session
			.request(&CircuitShape::XorTree {
				vectors: 4,
				width: 8,
			})
			.unwrap();
		let artifacts = ArtifactWriter::new("out").render(&session);

		let paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
		assert_eq!(
			paths,
			[
				PathBuf::from("src/xor_tree_4_8.v"),
				PathBuf::from("tb/tb_xor_tree_4_8.v")
			]
		);
		assert!(artifacts[0].contents.starts_with("// ===="));
	}
}
