pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router around a database pool.
pub fn app(pool: PgPool) -> Router {
    let mut resources = Router::new()
        .merge(board_routes())
        .merge(column_routes())
        .merge(ticket_routes());

    // Authentication is switched off entirely when running tests
    if config::config().auth_enabled() {
        resources = resources.layer(axum::middleware::from_fn(middleware::auth::authenticate));
    }

    Router::new()
        .route("/actuator/health", get(health))
        .nest("/auth", auth_routes())
        .merge(resources)
        .fallback(endpoint_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}

fn auth_routes() -> Router<PgPool> {
    use handlers::auth;

    Router::new()
        .route("/login", get(auth::login))
        .route("/refresh", post(auth::refresh))
}

fn board_routes() -> Router<PgPool> {
    use handlers::boards;

    Router::new()
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route("/boards/columns/:id", get(boards::get_board_columns))
        .route(
            "/boards/:id",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
}

fn column_routes() -> Router<PgPool> {
    use handlers::columns;

    Router::new()
        .route("/columns", get(columns::list_columns).post(columns::create_column))
        .route("/columns/tickets/:id", get(columns::get_column_tickets))
        .route(
            "/columns/:id",
            get(columns::get_column)
                .put(columns::update_column)
                .delete(columns::delete_column),
        )
}

fn ticket_routes() -> Router<PgPool> {
    use axum::routing::put;
    use handlers::tickets;

    Router::new()
        .route("/tickets", get(tickets::list_tickets).post(tickets::create_ticket))
        // static segment takes priority over /tickets/:id
        .route("/tickets/move", put(tickets::move_ticket))
        .route(
            "/tickets/:id",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP" }))
}

async fn endpoint_not_found() -> (StatusCode, &'static str) {
    (
        StatusCode::NOT_FOUND,
        "endpoint not found, did you remember to use the controller?",
    )
}
