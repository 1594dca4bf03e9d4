use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};
use serde_json::Value;

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};
use crate::error::NodeError;

/// Submit a new transaction into the pending pool.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, NodeError> {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let (sender, recipient, amount) = match (sender, recipient, amount) {
        (Some(s), Some(r), Some(a)) => (s, r, whole_amount(a)?),
        (None, _, _) => return Err(rejected("sender")),
        (_, None, _) => return Err(rejected("recipient")),
        (_, _, None) => return Err(rejected("amount")),
    };

    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let index = ledger.add_transaction(sender.clone(), recipient.clone(), amount);
        debug!(
            "POST /transactions/new/ - pool size now {}",
            ledger.pending().len()
        );
        index
    };

    info!("POST /transactions/new/ - {sender} -> {recipient} ({amount}) queued for block {index}");
    Ok(HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    }))
}

/// List transactions waiting for the next block.
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        size: ledger.pending().len(),
        transactions: ledger.pending(),
    })
}

/// Amounts are unsigned integers; anything else is refused with a reason.
fn whole_amount(raw: Value) -> Result<u64, NodeError> {
    raw.as_u64().ok_or_else(|| {
        warn!("POST /transactions/new/ - rejected: amount {raw}");
        NodeError::InvalidAmount(raw.to_string())
    })
}

fn rejected(field: &'static str) -> NodeError {
    warn!("POST /transactions/new/ - rejected: missing {field}");
    NodeError::MissingField(field)
}
