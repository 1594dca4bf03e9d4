use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use uuid::Uuid;

use crate::blockchain::{DEFAULT_DIFFICULTY, ProofOfWork};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PEER_TIMEOUT_SECS: u64 = 5;

/// Runtime settings, read from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub difficulty: u32,
    pub peer_timeout: Duration,
    /// Address credited with mining rewards.
    pub node_id: String,
    /// Peers registered at startup.
    pub peers: Vec<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            difficulty: DEFAULT_DIFFICULTY,
            peer_timeout: Duration::from_secs(DEFAULT_PEER_TIMEOUT_SECS),
            node_id: fresh_node_id(),
            peers: Vec::new(),
        }
    }
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Bad numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT", defaults.port),
            difficulty: ProofOfWork::new(parsed(&lookup, "DIFFICULTY", defaults.difficulty))
                .difficulty(),
            peer_timeout: Duration::from_secs(parsed(
                &lookup,
                "PEER_TIMEOUT_SECS",
                DEFAULT_PEER_TIMEOUT_SECS,
            )),
            node_id: lookup("NODE_ID")
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(defaults.node_id),
            peers: lookup("PEERS")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn pow(&self) -> ProofOfWork {
        ProofOfWork::new(self.difficulty)
    }
}

/// Globally unique node address: a v4 uuid without dashes.
pub fn fresh_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring {key}={raw:?}, using {default}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> NodeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NodeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.difficulty, 4);
        assert_eq!(cfg.peer_timeout, Duration::from_secs(5));
        assert_eq!(cfg.node_id.len(), 32);
        assert!(!cfg.node_id.contains('-'));
        assert!(cfg.peers.is_empty());
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "5005"),
            ("DIFFICULTY", "3"),
            ("PEER_TIMEOUT_SECS", "2"),
            ("NODE_ID", "miner-1"),
            ("PEERS", "http://a:1, b:2,,"),
        ]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5005);
        assert_eq!(cfg.difficulty, 3);
        assert_eq!(cfg.peer_timeout, Duration::from_secs(2));
        assert_eq!(cfg.node_id, "miner-1");
        assert_eq!(cfg.peers, vec!["http://a:1", "b:2"]);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = config(&[("PORT", "http"), ("DIFFICULTY", "-1")]);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.difficulty, 4);
    }

    #[test]
    fn difficulty_is_clamped() {
        assert_eq!(config(&[("DIFFICULTY", "40")]).difficulty, 8);
        assert_eq!(config(&[("DIFFICULTY", "0")]).difficulty, 1);
    }

    #[test]
    fn node_ids_are_unique() {
        assert_ne!(fresh_node_id(), fresh_node_id());
    }
}
