// Copyright 2026 The Binius Developers
use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument};

use crate::{
	config::GenerationConfig,
	error::Error,
	generators,
	module::{GeneratedModule, ModuleHandle},
	shape::CircuitShape,
};

/// Ledger of the modules generated during one run.
///
/// Every generator receives the session and requests its sub-circuits through it, so a shape is
/// generated once no matter how many parents need it. Modules are kept in emission order, which
/// places every module after the modules it instantiates.
#[derive(Debug, Default)]
pub struct GenerationSession {
	config: GenerationConfig,
	modules: Vec<GeneratedModule>,
	by_shape: FxHashMap<CircuitShape, usize>,
	by_name: FxHashMap<String, usize>,
}

impl GenerationSession {
	pub fn new(config: GenerationConfig) -> Self {
		Self {
			config,
			..Default::default()
		}
	}

	pub fn config(&self) -> &GenerationConfig {
		&self.config
	}

	/// Returns the module for `shape`, generating it and its dependencies on first request.
	///
	/// A repeated request regenerates the module and checks it against the recorded one; any
	/// difference, or a new shape whose module name is already taken, is a
	/// [`Error::ShapeCollision`].
	#[instrument(skip_all, fields(shape = %shape))]
	pub fn request(&mut self, shape: &CircuitShape) -> Result<ModuleHandle, Error> {
		let generator = generators::for_shape(shape)?;
		let name = shape.module_name();

		if let Some(&index) = self.by_shape.get(shape) {
			let fresh = generators::generate(generator.as_ref(), self)?;
			let recorded = &self.modules[index];
			if fresh != *recorded {
				return Err(Error::ShapeCollision {
					name,
					reason: "regenerated module differs from the recorded one".into(),
				});
			}
			debug!(module = %name, "reusing module");
			return Ok(recorded.handle());
		}

		if let Some(&index) = self.by_name.get(&name) {
			return Err(Error::ShapeCollision {
				name,
				reason: format!("already generated for {}", self.modules[index].shape),
			});
		}

		let module = generators::generate(generator.as_ref(), self)?;
		// A dependency may have claimed the name while this module was being built.
		if self.by_name.contains_key(&name) {
			return Err(Error::ShapeCollision {
				name,
				reason: "claimed by one of its own dependencies".into(),
			});
		}

		info!(
			module = %name,
			inputs = module.input_width,
			outputs = module.output_width,
			"generated module"
		);
		let handle = module.handle();
		let index = self.modules.len();
		self.modules.push(module);
		self.by_shape.insert(shape.clone(), index);
		self.by_name.insert(name, index);
		Ok(handle)
	}

	pub fn module(&self, name: &str) -> Option<&GeneratedModule> {
		self.by_name.get(name).map(|&index| &self.modules[index])
	}

	pub fn module_for(&self, shape: &CircuitShape) -> Option<&GeneratedModule> {
		self.by_shape.get(shape).map(|&index| &self.modules[index])
	}

	/// Modules in emission order.
	pub fn modules(&self) -> impl Iterator<Item = &GeneratedModule> {
		self.modules.iter()
	}

	pub fn len(&self) -> usize {
		self.modules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.modules.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use gf2e_field::{AffineSpec, FieldSpec, Polynomial};

	use super::*;

	fn poly(value: u64) -> Polynomial {
		Polynomial::from(value)
	}

	#[test]
	fn test_shared_shape_is_emitted_once() {
		let mut session = GenerationSession::default();
		let tree = CircuitShape::XorTree {
			vectors: 3,
			width: 20,
		};
		session
			.request(&CircuitShape::Affine {
				affine: AffineSpec::new(poly(17), poly(1)),
				input_width: 16,
			})
			.unwrap();
		session.request(&tree).unwrap();

		let names: Vec<_> = session.modules().map(|m| m.name.as_str()).collect();
		assert_eq!(names, ["xor_tree_3_20", "gf2_poly_affine_16"]);
		assert!(session.module_for(&tree).is_some());
	}

	#[test]
	fn test_repeated_request_returns_same_handle() {
		let mut session = GenerationSession::default();
		let shape = CircuitShape::ModReduce {
			field: FieldSpec::new(poly(285)).unwrap(),
			input_width: 12,
		};
		let first = session.request(&shape).unwrap();
		let second = session.request(&shape).unwrap();
		assert_eq!(first, second);
		assert_eq!(session.len(), 2);
	}

	#[test]
	fn test_name_clash_between_shapes_is_rejected() {
		let mut session = GenerationSession::default();
		session
			.request(&CircuitShape::Affine {
				affine: AffineSpec::new(poly(3), poly(0)),
				input_width: 8,
			})
			.unwrap();
		let clash = session.request(&CircuitShape::Affine {
			affine: AffineSpec::new(poly(5), poly(0)),
			input_width: 8,
		});
		assert_matches!(
			clash,
			Err(Error::ShapeCollision { name, .. }) if name == "gf2_poly_affine_8"
		);
	}

	#[test]
	fn test_invalid_shape_records_nothing() {
		let mut session = GenerationSession::default();
		let result = session.request(&CircuitShape::XorTree {
			vectors: 0,
			width: 4,
		});
		assert!(result.is_err());
		assert!(session.is_empty());
	}
}
