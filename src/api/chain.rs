use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, info, warn};
use std::time::Instant;

use super::models::{AppState, MineResponse, ValidateResponse};
use crate::blockchain::{Block, Ledger, MINING_REWARD, ProofOfWork, TipWatch, valid_chain};
use crate::error::NodeError;
use crate::network::ChainSnapshot;
use crate::transaction::MINING_SENDER;

/// Get the full blockchain in wire form.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainSnapshot::of(&ledger))
}

/// Validate our own chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: valid_chain(ledger.chain(), &state.pow),
        length: ledger.len(),
        difficulty: state.pow.difficulty(),
    })
}

/// Tip snapshot a proof search works against.
struct MiningJob {
    last_proof: u64,
    previous_hash: String,
    watch: TipWatch,
    epoch: u64,
}

impl MiningJob {
    /// Must be taken under the ledger lock so epoch and tip agree.
    fn snapshot(ledger: &Ledger) -> Self {
        let last = ledger.last_block();
        let watch = ledger.tip_watch();
        Self {
            last_proof: last.proof,
            previous_hash: last.hash(),
            epoch: watch.epoch(),
            watch,
        }
    }

    /// Search on the calling thread. `None` once the tip has moved.
    fn search(&self, pow: &ProofOfWork) -> Option<u64> {
        pow.search_until(self.last_proof, || self.watch.moved_since(self.epoch))
    }

    /// Reward `miner` and commit, unless the tip moved since the snapshot.
    fn seal(self, ledger: &mut Ledger, proof: u64, miner: &str) -> Result<Block, NodeError> {
        if ledger.tip_watch().moved_since(self.epoch) {
            return Err(NodeError::StaleProof);
        }

        // The sender is "0" to signify that this node has mined a new coin.
        ledger.add_transaction(MINING_SENDER, miner, MINING_REWARD);
        Ok(ledger.commit_block(proof, Some(self.previous_hash)).clone())
    }
}

/// Mine a new block:
/// - Snapshot the tip, then search a proof on the blocking pool (no lock held)
/// - Abort if the tip moves underneath the search
/// - Reward this node and seal the pending pool into the block
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, NodeError> {
    let job = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        MiningJob::snapshot(&ledger)
    };
    let last_proof = job.last_proof;

    let t0 = Instant::now();
    let pow = state.pow;
    let (job, proof) = web::block(move || {
        let proof = job.search(&pow);
        (job, proof)
    })
    .await
    .map_err(|e| NodeError::Internal(e.to_string()))?;
    let proof = proof.ok_or_else(|| {
        warn!("MINER - search on proof {last_proof} abandoned, tip moved");
        NodeError::StaleProof
    })?;
    debug!(
        "MINER - found proof {} for {} in {} ms",
        proof,
        last_proof,
        t0.elapsed().as_millis()
    );

    let block = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        job.seal(&mut ledger, proof, &state.node_id).inspect_err(|_| {
            warn!("MINER - proof {proof} is stale, tip moved while searching");
        })?
    };

    info!(
        "MINER - sealed block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );
    Ok(HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged",
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}
