use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{
    AppState, NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::error::NodeError;
use crate::network::registry::normalize;

/// Register one or more peers. All addresses must parse or none are added.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, NodeError> {
    let nodes = body.into_inner().nodes.unwrap_or_default();
    if nodes.is_empty() {
        return Err(NodeError::EmptyNodeList);
    }
    let locations = nodes
        .iter()
        .map(|n| normalize(n))
        .collect::<Result<Vec<_>, _>>()?;

    let mut registry = state.registry.lock().expect("mutex poisoned");
    for location in &locations {
        if registry.register(location)? {
            info!("NODES - registered peer {location}");
        }
    }

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes: registry.peers(),
    }))
}

/// Known peers.
#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    let registry = state.registry.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(NodesResponse {
        size: registry.len(),
        nodes: registry.peers(),
    })
}

/// Run consensus against every known peer.
#[get("/nodes/resolve/")]
pub async fn resolve(state: web::Data<AppState>) -> impl Responder {
    let peers = state.registry.lock().expect("mutex poisoned").peers();

    let replaced = state
        .resolver
        .resolve(&state.ledger, &peers, &state.fetcher)
        .await;

    let chain = state.ledger.lock().expect("mutex poisoned").chain().to_vec();
    HttpResponse::Ok().json(ResolveResponse {
        message: if replaced {
            "Our chain was replaced"
        } else {
            "Our chain is authoritative"
        },
        replaced,
        chain,
    })
}
