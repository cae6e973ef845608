pub mod client;
pub mod error;
pub mod parse;

pub use client::FeedClient;
pub use error::FeedError;
pub use parse::{parse_feed, restock_targets};
