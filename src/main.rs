use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use pow_ledger_node::api::{self, AppState};
use pow_ledger_node::config::NodeConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env();
    let state = AppState::new(&config).map_err(std::io::Error::other)?;

    println!(
        "⛓️ Starting node {} at http://{}:{}",
        config.node_id, config.host, config.port
    );
    info!(
        "difficulty={} peers={} peer_timeout={:?}",
        config.difficulty,
        config.peers.len(),
        config.peer_timeout
    );

    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
