//! Core application primitives (pass orchestration)

pub mod runtime;

pub use runtime::*;
