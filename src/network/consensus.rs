//! Longest-valid-chain consensus.
//!
//! Every registered peer is polled concurrently, each under its own timeout.
//! Results are then reduced in peer order while the ledger lock is held, so a
//! replacement is either fully applied or not visible at all.

use std::sync::Mutex;
use std::time::Duration;

use actix_web::rt::time::timeout;
use futures::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, Ledger, ProofOfWork, valid_chain};
use crate::error::PeerError;

/// Wire form of a node's chain: `{ "chain": [...], "length": n }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainSnapshot {
    pub fn of(ledger: &Ledger) -> Self {
        Self {
            chain: ledger.chain().to_vec(),
            length: ledger.len(),
        }
    }

    /// A reported length that disagrees with the payload is a malformed answer.
    fn checked(self) -> Result<Self, PeerError> {
        if self.length != self.chain.len() {
            return Err(PeerError::Malformed(format!(
                "length {} but {} blocks",
                self.length,
                self.chain.len()
            )));
        }
        Ok(self)
    }
}

/// Capability to retrieve one peer's chain.
#[allow(async_fn_in_trait)]
pub trait ChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError>;
}

#[derive(Debug, Clone)]
pub struct Resolver {
    pow: ProofOfWork,
    peer_timeout: Duration,
}

impl Resolver {
    pub fn new(pow: ProofOfWork, peer_timeout: Duration) -> Self {
        Self { pow, peer_timeout }
    }

    /// Poll `peers` and adopt the longest valid chain strictly longer than ours.
    ///
    /// Returns `true` if the local chain was replaced. Peer failures of any
    /// kind are logged and skipped.
    pub async fn resolve<F: ChainFetcher>(
        &self,
        ledger: &Mutex<Ledger>,
        peers: &[String],
        fetcher: &F,
    ) -> bool {
        let fetches = peers.iter().map(|peer| async move {
            let result = match timeout(self.peer_timeout, fetcher.fetch_chain(peer)).await {
                Ok(reply) => reply.and_then(ChainSnapshot::checked),
                Err(_) => Err(PeerError::Timeout),
            };
            (peer.as_str(), result)
        });
        let results = join_all(fetches).await;

        let mut ledger = ledger.lock().expect("mutex poisoned");
        let local_length = ledger.len();
        match self.select(local_length, results) {
            Some(chain) => {
                info!(
                    "RESOLVE - replacing local chain ({} blocks) with {} blocks",
                    local_length,
                    chain.len()
                );
                ledger.replace_chain(chain)
            }
            None => {
                debug!("RESOLVE - local chain ({local_length} blocks) is authoritative");
                false
            }
        }
    }

    /// Reduction step: first peer (in iteration order) with the greatest
    /// valid length above `local_length` wins. Equal lengths never win.
    pub fn select<'a, I>(&self, local_length: usize, results: I) -> Option<Vec<Block>>
    where
        I: IntoIterator<Item = (&'a str, Result<ChainSnapshot, PeerError>)>,
    {
        let mut max_length = local_length;
        let mut candidate = None;

        for (peer, result) in results {
            let snapshot = match result {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("RESOLVE - skipping {peer}: {e}");
                    continue;
                }
            };

            if snapshot.length <= max_length {
                debug!(
                    "RESOLVE - {peer} has {} blocks, not longer than {max_length}",
                    snapshot.length
                );
                continue;
            }
            if !valid_chain(&snapshot.chain, &self.pow) {
                warn!("RESOLVE - {peer} sent an invalid chain of {} blocks", snapshot.length);
                continue;
            }

            max_length = snapshot.length;
            candidate = Some(snapshot.chain);
        }

        candidate
    }
}
