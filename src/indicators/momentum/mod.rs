//! Momentum indicators: RSI and RSI divergence

pub mod divergence;
pub mod rsi;

pub use divergence::*;
pub use rsi::*;
