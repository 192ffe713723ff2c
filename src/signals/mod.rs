//! Signal scoring: feed records in, ranked signals out.

pub mod categories;
pub mod correlation;
pub mod engine;
pub mod scoring;

pub use categories::*;
pub use correlation::*;
pub use engine::*;
pub use scoring::*;
