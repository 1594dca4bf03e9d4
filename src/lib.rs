//! Single-ledger Proof-of-Work node: blocks, pending transactions, mining
//! and longest-valid-chain consensus between peers.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod transaction;

#[cfg(test)]
mod test_utils;
