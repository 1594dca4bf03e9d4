//! Helpers shared by unit tests.

use crate::blockchain::{Block, Ledger, ProofOfWork};

/// Cheap difficulty so tests mine in microseconds.
pub const TEST_POW: ProofOfWork = ProofOfWork::with_difficulty(2);

/// Mine `ledger` forward until it holds `blocks` blocks.
pub fn extend(ledger: &mut Ledger, blocks: usize, pow: &ProofOfWork) {
    while ledger.len() < blocks {
        let proof = pow.search(ledger.last_block().proof);
        ledger.add_transaction("alice", "bob", ledger.len() as u64);
        ledger.commit_block(proof, None);
    }
}

/// Valid chain of `blocks` blocks at [`TEST_POW`] difficulty.
pub fn mined_chain(blocks: usize) -> Vec<Block> {
    let mut ledger = Ledger::new();
    extend(&mut ledger, blocks, &TEST_POW);
    ledger.chain().to_vec()
}
