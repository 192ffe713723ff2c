//! External collaborators supplying feed data.

pub mod feeds;

pub use feeds::{load_batch, FeedProvider, JsonSnapshotProvider};
