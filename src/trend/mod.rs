//! Trend classification over daily price history.

pub mod engine;
pub mod evaluator;

pub use engine::*;
pub use evaluator::*;
