use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    // Separate short locks
    let (height, pending_size) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        (ledger.len(), ledger.pending().len())
    };
    let peers = state.registry.lock().expect("mutex poisoned").len();

    HttpResponse::Ok().json(StatsResponse {
        height,
        difficulty: state.pow.difficulty(),
        pending_size,
        peers,
        node_id: state.node_id.clone(),
    })
}
