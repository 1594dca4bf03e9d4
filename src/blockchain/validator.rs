use super::{Block, ProofOfWork};

/// Check an arbitrary candidate chain: positional indices, hash linkage
/// and Proof-of-Work between every adjacent pair.
///
/// Total: any defect yields `false`. The genesis block is not checked
/// against the PoW predicate since it has no predecessor.
pub fn valid_chain(chain: &[Block], pow: &ProofOfWork) -> bool {
    let Some(genesis) = chain.first() else {
        return false;
    };
    if !genesis.is_genesis() {
        return false;
    }

    for (position, pair) in chain.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);

        if curr.index != position as u64 + 2 {
            return false;
        }
        if curr.previous_hash != prev.hash() {
            return false;
        }
        if !pow.valid_proof(prev.proof, curr.proof) {
            return false;
        }
    }

    true
}
