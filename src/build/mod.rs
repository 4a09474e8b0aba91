// src/build/mod.rs

//! Per-unit compilation: output directory, argument template and the
//! supervised `wasm-pack build` call.

pub mod builder;

pub use builder::{BuildOptions, UnitBuilder};
