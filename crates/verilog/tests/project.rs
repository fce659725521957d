// Copyright 2026 The Binius Developers
use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::Result;
use assert_matches::assert_matches;
use gf2e_field::{AffineSpec, FieldSpec, Polynomial};
use gf2e_frontend::{CircuitShape, GenerationSession};
use gf2e_verilog::{ArtifactWriter, PrngProject, WriteError};

/// Fresh directory under the system temp dir, unique per test.
fn scratch_dir(test: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("gf2e-verilog-{test}-{}", std::process::id()));
	let _ = fs::remove_dir_all(&dir);
	fs::create_dir_all(&dir).unwrap();
	dir
}

fn prng_session(affine: &AffineSpec, field: &FieldSpec) -> Result<GenerationSession> {
	let mut session = GenerationSession::default();
	session.request(&CircuitShape::Prng {
		affine: affine.clone(),
		field: field.clone(),
	})?;
	Ok(session)
}

fn file_names(dir: &Path) -> Result<Vec<String>> {
	let mut names = fs::read_dir(dir)?
		.map(|entry| Ok(entry?.file_name().to_string_lossy().into_owned()))
		.collect::<Result<Vec<_>>>()?;
	names.sort();
	Ok(names)
}

#[test]
fn writes_every_module_and_testbench() -> Result<()> {
	let out = scratch_dir("writer");
	let mut session = GenerationSession::default();
	session.request(&CircuitShape::AffineMod {
		affine: AffineSpec::new(Polynomial::from(17), Polynomial::from(1)),
		field: FieldSpec::new(Polynomial::from(285))?,
		input_width: 16,
	})?;

	let written = ArtifactWriter::new(&out).write(&session)?;
	assert_eq!(written.len(), 2 * session.len());
	assert_eq!(
		file_names(&out.join("src"))?,
		[
			"gf2_poly_affine_16.v",
			"gf2_poly_affine_mod_16.v",
			"gf2_poly_mod_20.v",
			"xor_tree_13_8.v",
			"xor_tree_3_20.v",
		]
	);
	let bench = fs::read_to_string(out.join("tb/tb_gf2_poly_mod_20.v"))?;
	assert!(bench.contains("module tb_gf2_poly_mod_20;"));

	fs::remove_dir_all(&out)?;
	Ok(())
}

#[test]
fn prng_project_layout() -> Result<()> {
	let out = scratch_dir("project");
	let template = out.join("template");
	fs::create_dir_all(template.join("scripts"))?;
	fs::write(template.join("run.do"), "vsim tb\n")?;
	fs::write(template.join("scripts/wave.do"), "add wave *\n")?;
	let license = out.join("LICENSE.txt");
	fs::write(&license, "MIT\n")?;

	let affine = AffineSpec::new(Polynomial::from(23), Polynomial::from(5));
	let field = FieldSpec::new(Polynomial::from(285))?;
	let session = prng_session(&affine, &field)?;
	let project = PrngProject::new(affine, field)
		.with_template_dir(&template)
		.with_license(&license);

	let dir = project.write(&session, &out)?;
	assert_eq!(dir, out.join("gf2_8_prng"));
	assert!(dir.join("rtl/src/gf2_8_prng.v").is_file());
	assert!(dir.join("rtl/tb/tb_gf2_8_prng.v").is_file());
	assert_eq!(fs::read_to_string(dir.join("modelsim/scripts/wave.do"))?, "add wave *\n");
	assert!(dir.join("modelsim/run.do").is_file());
	assert_eq!(fs::read_to_string(dir.join("LICENSE"))?, "MIT\n");
	assert!(fs::read_to_string(dir.join("README.md"))?.contains("GF(2^8)"));

	fs::remove_dir_all(&out)?;
	Ok(())
}

#[test]
fn missing_template_writes_nothing() -> Result<()> {
	let out = scratch_dir("missing");
	let affine = AffineSpec::new(Polynomial::from(2), Polynomial::from(1));
	let field = FieldSpec::new(Polynomial::from(0b1011))?;
	let session = prng_session(&affine, &field)?;

	let result = PrngProject::new(affine, field)
		.with_template_dir(out.join("nope"))
		.write(&session, &out);
	assert_matches!(result, Err(WriteError::MissingInput(path)) if path.ends_with("nope"));
	assert!(!out.join("gf2_3_prng").exists());

	fs::remove_dir_all(&out)?;
	Ok(())
}
