use std::time::Duration;

use log::debug;

use super::consensus::{ChainFetcher, ChainSnapshot};
use crate::error::PeerError;

/// Path under which every node serves its chain.
pub const CHAIN_PATH: &str = "/api/v1/chain/";

/// Fetches peers' chains over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    client: reqwest::Client,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let url = format!("http://{peer}{CHAIN_PATH}");
        debug!("GET {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                PeerError::Timeout
            } else {
                PeerError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PeerError::Status(status.as_u16()));
        }

        response
            .json::<ChainSnapshot>()
            .await
            .map_err(|e| PeerError::Malformed(e.to_string()))
    }
}
