// Copyright 2026 The Binius Developers
use std::fmt;

use gf2e_field::{AffineSpec, FieldSpec};

/// Structural key of a generatable sub-circuit.
///
/// Equal shapes always yield identical modules, which is what lets the session share them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CircuitShape {
	/// Bitwise XOR of `vectors` inputs of `width` bits.
	XorTree { vectors: usize, width: usize },
	/// `a(x)·p(x) + c(x)` for an `input_width`-bit `p`.
	Affine {
		affine: AffineSpec,
		input_width: usize,
	},
	/// `y(x) mod h(x)` for an `input_width`-bit `y`.
	ModReduce {
		field: FieldSpec,
		input_width: usize,
	},
	/// `a(x)·p(x) + c(x) mod h(x)` for an `input_width`-bit `p`.
	AffineMod {
		affine: AffineSpec,
		field: FieldSpec,
		input_width: usize,
	},
	/// Clocked recurrence `x_{n+1} = a(x)·x_n + c(x) mod h(x)`.
	Prng { affine: AffineSpec, field: FieldSpec },
}

impl CircuitShape {
	/// The HDL module name; the same shape always maps to the same name.
	pub fn module_name(&self) -> String {
		match self {
			Self::XorTree { vectors, width } => format!("xor_tree_{vectors}_{width}"),
			Self::Affine { input_width, .. } => format!("gf2_poly_affine_{input_width}"),
			Self::ModReduce { input_width, .. } => format!("gf2_poly_mod_{input_width}"),
			Self::AffineMod { input_width, .. } => format!("gf2_poly_affine_mod_{input_width}"),
			Self::Prng { field, .. } => format!("gf2_{}_prng", field.degree()),
		}
	}
}

impl fmt::Display for CircuitShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::XorTree { vectors, width } => {
				write!(f, "xor-tree({vectors} x {width} bits)")
			}
			Self::Affine {
				affine,
				input_width,
			} => write!(f, "affine(a = {}, c = {}, {input_width} bits)", affine.a, affine.c),
			Self::ModReduce { field, input_width } => {
				write!(f, "mod(h = {}, {input_width} bits)", field.modulus())
			}
			Self::AffineMod {
				affine,
				field,
				input_width,
			} => write!(
				f,
				"affine-mod(a = {}, c = {}, h = {}, {input_width} bits)",
				affine.a,
				affine.c,
				field.modulus()
			),
			Self::Prng { affine, field } => write!(
				f,
				"prng(a = {}, c = {}, h = {})",
				affine.a,
				affine.c,
				field.modulus()
			),
		}
	}
}
