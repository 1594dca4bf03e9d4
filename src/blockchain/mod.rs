pub mod block;
pub mod hasher;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use model::{Ledger, TipWatch};
pub use pow::ProofOfWork;
pub use validator::valid_chain;

/// Default Proof-of-Work difficulty (number of leading zero hex digits).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Difficulty bounds accepted from configuration.
pub const DIFF_MIN: u32 = 1;
pub const DIFF_MAX: u32 = 8;

/// Proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel standing in for the genesis block's missing predecessor hash.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Coins issued to the miner of each block.
pub const MINING_REWARD: u64 = 1;
