//! Technical indicators over daily closes.
//!
//! All functions are pure and tolerate short input by returning `None` or
//! `false` rather than panicking.

pub mod momentum;
pub mod trend;
pub mod volume;

pub use momentum::*;
pub use trend::*;
pub use volume::*;
