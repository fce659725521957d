// Copyright 2026 The Binius Developers
use crate::format::PolyFormat;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
	#[error("invalid polynomial: {0}")]
	InvalidPolynomial(&'static str),
	#[error("cannot parse {input:?} as a {format} polynomial")]
	Parse { input: String, format: PolyFormat },
}
