use axum::{Router, Server, middleware::from_fn};
use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager as DbConnectionManager},
};
use std::sync::Arc;
use taskdeck::{AppState, db::DbPool};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    let config = taskdeck::config::Config::from_env().expect("Failed to load configuration");
    taskdeck::init_tracing(&config);

    let manager = DbConnectionManager::<PgConnection>::new(&config.database_url);
    let db: DbPool = r2d2::Pool::builder()
        .max_size(config.database_max_connections)
        .min_idle(Some(config.database_min_connections))
        .connection_timeout(std::time::Duration::from_secs(
            config.database_connection_timeout,
        ))
        .build(manager)
        .expect("Failed to create database connection pool");

    let addr = config
        .server_address()
        .parse()
        .expect("Invalid server address");
    let state = Arc::new(AppState::new(db, config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every API route sits behind bearer-token verification; token issuance
    // belongs to the identity service.
    let api_routes = taskdeck::routes::create_router(state.clone())
        .layer(from_fn(taskdeck::middleware::auth::auth_middleware));

    let app = Router::new()
        .merge(api_routes)
        .layer(cors)
        .layer(from_fn(taskdeck::middleware::logger::logger));

    tracing::info!("Server running at http://{}", addr);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("Server error");
}
