use crate::blockchain::{Block, Ledger, ProofOfWork};
use crate::config::NodeConfig;
use crate::network::{HttpChainFetcher, NodeRegistry, Resolver};
use crate::transaction::Transaction;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Shared application state: the ledger, known peers and consensus plumbing.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub registry: Mutex<NodeRegistry>,
    pub pow: ProofOfWork,
    pub resolver: Resolver,
    pub fetcher: HttpChainFetcher,
    /// This node's address, credited with mining rewards.
    pub node_id: String,
}

impl AppState {
    pub fn new(config: &NodeConfig) -> Result<Self, reqwest::Error> {
        let pow = config.pow();
        let mut registry = NodeRegistry::new();
        for peer in &config.peers {
            if let Err(e) = registry.register(peer) {
                warn!("ignoring configured peer: {e}");
            }
        }
        if !registry.is_empty() {
            info!("{} peers configured: {:?}", registry.len(), registry.peers());
        }

        Ok(Self {
            ledger: Mutex::new(Ledger::new()),
            registry: Mutex::new(registry),
            pow,
            resolver: Resolver::new(pow, config.peer_timeout),
            fetcher: HttpChainFetcher::new(config.peer_timeout)?,
            node_id: config.node_id.clone(),
        })
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

/// Fields are optional so an absent one can be reported by name.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    /// Kept loose so a non-integer amount can be refused with a reason.
    pub amount: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub size: usize,
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: usize,
    pub difficulty: u32,
    pub pending_size: usize,
    pub peers: usize,
    pub node_id: String,
}
