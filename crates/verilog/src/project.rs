// Copyright 2026 The Binius Developers
use std::{
	fs,
	path::{Path, PathBuf},
};

use gf2e_field::{AffineSpec, FieldSpec, PolyFormat, Polynomial};
use gf2e_frontend::GenerationSession;
use tracing::{info, instrument};
use walkdir::WalkDir;

use crate::{
	error::WriteError,
	writer::{ArtifactWriter, create_dir, write_file},
};

/// Standalone directory for one PRNG: `gf2_<e>_prng/` holding `rtl/src`, `rtl/tb`, a README and,
/// when configured, a copied simulation template (`modelsim/`) and license file.
#[derive(Debug, Clone)]
pub struct PrngProject {
	affine: AffineSpec,
	field: FieldSpec,
	template_dir: Option<PathBuf>,
	license: Option<PathBuf>,
}

impl PrngProject {
	pub fn new(affine: AffineSpec, field: FieldSpec) -> Self {
		Self {
			affine,
			field,
			template_dir: None,
			license: None,
		}
	}

	pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.template_dir = Some(dir.into());
		self
	}

	pub fn with_license(mut self, path: impl Into<PathBuf>) -> Self {
		self.license = Some(path.into());
		self
	}

	pub fn name(&self) -> String {
		format!("gf2_{}_prng", self.field.degree())
	}

	pub fn readme(&self) -> String {
		let e = self.field.degree();
		let alg = |p: &Polynomial| PolyFormat::Alg.render(p);
		let mut lines = vec![
			format!("# Pseudorandom Number Generator (PRNG) over GF(2^{e})"),
			String::new(),
			"Implements a PRNG based on the affine recurrence relation:".into(),
			"```".into(),
			"    x_{n+1}(x) = a(x)·x_n(x) + c(x) mod h(x)".into(),
			"```".into(),
			"All polynomials have binary coefficients (0 or 1). The recurrence operates".into(),
			format!("over the finite field GF(2^{e}), defined by the irreducible polynomial h(x)."),
			String::new(),
			"Constant polynomials given as:".into(),
			format!("- a(x) = {}   // {e}-bit vector", alg(&self.affine.a)),
			format!("- c(x) = {}   // {e}-bit vector", alg(&self.affine.c)),
			format!(
				"- h(x) = {}   // {}-bit irreducible polynomial",
				alg(self.field.modulus()),
				e + 1
			),
			String::new(),
			"Project structure:".into(),
			"```".into(),
			format!("    {}/", self.name()),
			"    ├── rtl/".into(),
			"    │   ├── src/       # Verilog modules".into(),
			"    │   └── tb/        # Self-checking testbenches".into(),
		];
		if self.template_dir.is_some() {
			lines.push("    ├── modelsim/      # Simulation scripts".into());
		}
		if self.license.is_some() {
			lines.push("    ├── LICENSE        # License file".into());
		}
		lines.push("    └── README.md      # Project details".into());
		lines.push("```".into());
		lines.push(String::new());
		lines.join("\n")
	}

	/// Writes the project under `out_dir` and returns the project directory.
	///
	/// Optional inputs are checked before anything is written.
	#[instrument(skip_all, fields(project = %self.name()))]
	pub fn write(
		&self,
		session: &GenerationSession,
		out_dir: &Path,
	) -> Result<PathBuf, WriteError> {
		for input in self.template_dir.iter().chain(&self.license) {
			if !input.exists() {
				return Err(WriteError::MissingInput(input.clone()));
			}
		}

		let project_dir = out_dir.join(self.name());
		ArtifactWriter::new(project_dir.join("rtl")).write(session)?;

		if let Some(template) = &self.template_dir {
			let copied = copy_tree(template, &project_dir.join("modelsim"))?;
			info!(files = copied, "copied simulation template");
		}

		write_file(&project_dir.join("README.md"), &self.readme())?;

		if let Some(license) = &self.license {
			let to = project_dir.join("LICENSE");
			fs::copy(license, &to).map_err(|source| WriteError::Copy {
				from: license.clone(),
				to,
				source,
			})?;
		}

		info!(dir = %project_dir.display(), "project written");
		Ok(project_dir)
	}
}

/// Recursively copies `from` into `to`, returning the number of files copied.
fn copy_tree(from: &Path, to: &Path) -> Result<usize, WriteError> {
	let mut copied = 0;
	for entry in WalkDir::new(from) {
		let entry = entry?;
		let Ok(relative) = entry.path().strip_prefix(from) else {
			continue;
		};
		let target = to.join(relative);
		if entry.file_type().is_dir() {
			create_dir(&target)?;
		} else {
			fs::copy(entry.path(), &target).map_err(|source| WriteError::Copy {
				from: entry.path().to_path_buf(),
				to: target.clone(),
				source,
			})?;
			copied += 1;
		}
	}
	Ok(copied)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn project() -> PrngProject {
		PrngProject::new(
			AffineSpec::new(Polynomial::from(23), Polynomial::from(5)),
			FieldSpec::new(Polynomial::from(285)).unwrap(),
		)
	}

	#[test]
	fn test_readme_lists_constants() {
		let readme = project().readme();
		assert!(readme.starts_with("# Pseudorandom Number Generator (PRNG) over GF(2^8)"));
		assert!(readme.contains("- a(x) = x^4 + x^2 + x + 1   // 8-bit vector"));
		assert!(readme.contains("- c(x) = x^2 + 1   // 8-bit vector"));
		assert!(readme.contains(
			"- h(x) = x^8 + x^4 + x^3 + x^2 + 1   // 9-bit irreducible polynomial"
		));
		assert!(readme.contains("    gf2_8_prng/"));
		assert!(!readme.contains("modelsim/"));
	}

	#[test]
	fn test_readme_mentions_optional_parts() {
		let readme = project()
			.with_template_dir("templates/modelsim")
			.with_license("LICENSE")
			.readme();
		assert!(readme.contains("├── modelsim/"));
		assert!(readme.contains("├── LICENSE"));
	}
}
