//! Volume indicators

pub mod distribution;

pub use distribution::*;
