//! Shared numeric and date helpers.

pub mod math;
pub mod time;
