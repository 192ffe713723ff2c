//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod price;
pub mod records;
pub mod signal;
pub mod trend;

pub use indicators::{EmaIndicator, RsiIndicator, VolumeIndicator};
pub use price::{PriceBar, PriceSeries};
pub use records::{FeedBatch, Filing, NewsArticle, Patent, PriceQuote, Preprint};
pub use signal::{Signal, SignalKind, SignalPayload};
pub use trend::{TrendPoint, TrendStatus};
