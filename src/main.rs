use tracing::info;

use taskboard_api::{app, config, database};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, KEYCLOAK_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    info!("starting server in {:?} environment", config.environment);

    let pool = database::pool::connect()
        .await
        .unwrap_or_else(|e| panic!("failed to initialise database: {}", e));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    info!("server launched successfully, listening at http://{}", bind_addr);

    axum::serve(listener, app(pool)).await.expect("server");
}
