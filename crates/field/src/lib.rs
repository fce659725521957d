// Copyright 2026 The Binius Developers
//! Arithmetic over GF(2)[x] and the binary extension fields GF(2^e).
//!
//! Polynomials are stored as arbitrary-precision bit masks: bit `i` is the coefficient of `x^i`.
//! Everything in this crate is pure; the same values are used to derive circuit structure and to
//! compute golden outputs for test harnesses.

mod affine;
mod error;
mod field;
mod format;
mod polynomial;

pub use affine::AffineSpec;
pub use error::FieldError;
pub use field::FieldSpec;
pub use format::{MAX_ALGEBRAIC_EXPONENT, PolyFormat};
pub use polynomial::{Polynomial, affine, affine_mod};
