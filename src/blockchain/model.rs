use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Block;
use crate::transaction::Transaction;

/// Shared counter of tip changes, readable without the ledger lock.
///
/// Only the owning [`Ledger`] advances it, from inside `commit_block` and
/// `replace_chain`, so a reader holding the lock always sees an epoch that
/// matches the tip it observes.
#[derive(Debug, Clone, Default)]
pub struct TipWatch(Arc<AtomicU64>);

impl TipWatch {
    pub fn epoch(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Has the tip changed since `epoch` was read?
    pub fn moved_since(&self, epoch: u64) -> bool {
        self.epoch() != epoch
    }

    fn advance(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory chain plus the pool of transactions waiting for the next block.
///
/// The chain is never empty: construction seeds it with the genesis block.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    tip: TipWatch,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger with a genesis block and an empty pool.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            tip: TipWatch::default(),
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    /// Queue a transaction for the next block.
    /// Returns the index of the block that will hold it.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: u64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        self.last_block().index + 1
    }

    /// Seal the pending pool into a new block and append it.
    ///
    /// `previous_hash` defaults to the hash of the current last block.
    pub fn commit_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let index = self.chain.len() as u64 + 1;
        let transactions = std::mem::take(&mut self.pending);

        self.chain.push(Block::new(index, transactions, proof, previous_hash));
        self.tip.advance();
        self.last_block()
    }

    /// Swap in a whole chain (adopted from a peer). The pending pool is kept.
    ///
    /// Callers are responsible for validating `chain` first; an empty chain is refused.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> bool {
        if chain.is_empty() {
            return false;
        }
        self.chain = chain;
        self.tip.advance();
        true
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Handle for watching tip changes outside the lock.
    pub fn tip_watch(&self) -> TipWatch {
        self.tip.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TEST_POW, extend};

    #[test]
    fn starts_with_genesis_and_empty_pool() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.last_block().index, 1);
        assert_eq!(ledger.last_block().proof, 100);
        assert_eq!(ledger.last_block().previous_hash, "1");
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn add_transaction_reports_next_index_without_touching_chain() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.add_transaction("a", "b", 5), 2);
        assert_eq!(ledger.add_transaction("b", "c", 0), 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pending().len(), 2);
    }

    #[test]
    fn commit_moves_pool_into_block() {
        let mut ledger = Ledger::new();
        let genesis_hash = ledger.last_block().hash();
        ledger.add_transaction("a", "b", 5);

        let block = ledger.commit_block(42, None).clone();
        assert_eq!(block.index, 2);
        assert_eq!(block.proof, 42);
        assert_eq!(block.previous_hash, genesis_hash);
        assert_eq!(block.transactions, vec![Transaction::new("a", "b", 5)]);
        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn commit_honours_explicit_previous_hash() {
        let mut ledger = Ledger::new();
        let block = ledger.commit_block(1, Some("feed".into()));
        assert_eq!(block.previous_hash, "feed");
        assert!(block.transactions.is_empty());
    }

    #[test]
    fn indices_follow_positions() {
        let mut ledger = Ledger::new();
        extend(&mut ledger, 4, &TEST_POW);
        for (i, b) in ledger.chain().iter().enumerate() {
            assert_eq!(b.index, i as u64 + 1);
        }
    }

    #[test]
    fn tip_epoch_moves_with_commit_and_replace() {
        let mut ledger = Ledger::new();
        let watch = ledger.tip_watch();
        let start = watch.epoch();

        ledger.add_transaction("a", "b", 1);
        assert!(!watch.moved_since(start));

        ledger.commit_block(1, None);
        assert!(watch.moved_since(start));

        let after_commit = watch.epoch();
        assert!(!ledger.replace_chain(Vec::new()));
        assert!(!watch.moved_since(after_commit));

        ledger.replace_chain(crate::test_utils::mined_chain(2));
        assert!(watch.moved_since(after_commit));
    }

    #[test]
    fn replace_chain_refuses_empty() {
        let mut ledger = Ledger::new();
        assert!(!ledger.replace_chain(Vec::new()));
        assert_eq!(ledger.len(), 1);

        let other = crate::test_utils::mined_chain(3);
        assert!(ledger.replace_chain(other.clone()));
        assert_eq!(ledger.chain(), other.as_slice());
    }
}
