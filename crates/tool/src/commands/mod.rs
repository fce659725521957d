// Copyright 2026 The Binius Developers
pub mod affine;
pub mod affine_mod;
pub mod modular;
pub mod prng;
pub mod xor_tree;

pub use affine::AffineCommand;
pub use affine_mod::AffineModCommand;
pub use modular::ModReduceCommand;
pub use prng::PrngCommand;
pub use xor_tree::XorTreeCommand;
