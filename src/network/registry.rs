use std::collections::BTreeSet;

use url::Url;

use crate::error::RegistryError;

/// Known peers, stored as normalized `host:port` strings.
///
/// Backed by a `BTreeSet` so iteration is lexicographic and therefore
/// reproducible across runs.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer. Returns `Ok(false)` when the normalized location was already known.
    pub fn register(&mut self, address: &str) -> Result<bool, RegistryError> {
        let location = normalize(address)?;
        Ok(self.nodes.insert(location))
    }

    /// Current peers in lexicographic order.
    pub fn peers(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Reduce `http://host:port/anything`, `host:port` and friends to `host:port`.
/// A missing port defaults to 80. Peers are dialled over plain http, so any
/// other scheme is refused.
pub fn normalize(address: &str) -> Result<String, RegistryError> {
    let trimmed = address.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|_| RegistryError::Unparseable(address.to_string()))?;
    if url.scheme() != "http" {
        return Err(RegistryError::UnsupportedScheme(address.to_string()));
    }
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| RegistryError::MissingHost(address.to_string()))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| RegistryError::Unparseable(address.to_string()))?;

    Ok(format!("{host}:{port}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_common_forms() {
        assert_eq!(normalize("http://192.168.0.5:5000").unwrap(), "192.168.0.5:5000");
        assert_eq!(normalize("http://192.168.0.5:5000/chain").unwrap(), "192.168.0.5:5000");
        assert_eq!(normalize("192.168.0.5:5000").unwrap(), "192.168.0.5:5000");
        assert_eq!(normalize("localhost:5001").unwrap(), "localhost:5001");
        assert_eq!(normalize("  http://Example.COM:8080 ").unwrap(), "example.com:8080");
        assert_eq!(normalize("http://node.local").unwrap(), "node.local:80");
    }

    #[test]
    fn only_plain_http_is_accepted() {
        for address in ["https://node.local", "https://node.local:443", "ws://node.local:80"] {
            assert_eq!(
                normalize(address),
                Err(RegistryError::UnsupportedScheme(address.to_string()))
            );
        }
        let mut registry = NodeRegistry::new();
        assert!(registry.register("https://node.local").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_garbage() {
        assert!(normalize("").is_err());
        assert!(normalize("http://").is_err());
        assert!(normalize("http://host:notaport").is_err());
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = NodeRegistry::new();
        assert!(registry.register("http://127.0.0.1:5001").unwrap());
        assert!(!registry.register("127.0.0.1:5001").unwrap());
        assert!(!registry.register("http://127.0.0.1:5001/").unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn peers_are_sorted() {
        let mut registry = NodeRegistry::new();
        for addr in ["c.node:1", "a.node:1", "b.node:1"] {
            registry.register(addr).unwrap();
        }
        assert_eq!(registry.peers(), vec!["a.node:1", "b.node:1", "c.node:1"]);
    }

    #[test]
    fn failed_registration_leaves_registry_untouched() {
        let mut registry = NodeRegistry::new();
        assert!(registry.register("http://").is_err());
        assert!(registry.is_empty());
    }
}
