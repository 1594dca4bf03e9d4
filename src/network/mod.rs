pub mod client;
pub mod consensus;
pub mod registry;

pub use client::HttpChainFetcher;
pub use consensus::{ChainFetcher, ChainSnapshot, Resolver};
pub use registry::NodeRegistry;
