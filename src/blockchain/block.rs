use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::hasher;
use crate::blockchain::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A single block in the chain. Blocks are never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain.
    pub index: u64,
    pub timestamp: f64, // seconds since Unix epoch (UTC)
    pub transactions: Vec<Transaction>,
    /// Proof-of-Work nonce, valid relative to the previous block's proof.
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self::new(
            1,
            Vec::new(),
            GENESIS_PROOF,
            GENESIS_PREVIOUS_HASH.to_string(),
        )
    }

    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Hex digest of this block's canonical form.
    pub fn hash(&self) -> String {
        hasher::hash(self)
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 1
    }
}

/// Current time as fractional seconds, microsecond resolution.
fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
