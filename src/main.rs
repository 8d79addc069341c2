use std::sync::{Arc, Mutex};

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use zenspots::config::AppConfig;
use zenspots::db;
use zenspots::handlers;
use zenspots::services::catalog;
use zenspots::services::remote::supabase::SupabaseStore;
use zenspots::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let db = Arc::new(Mutex::new(conn));

    let remote = SupabaseStore::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    );

    let source = catalog::sync_spaces(&remote, &db).await?;
    tracing::info!("serving space catalog from {source:?} data");
    {
        let conn = db.lock().unwrap();
        catalog::seed_reviews_if_empty(&conn)?;
    }

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        remote: Box::new(remote),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/spaces", get(handlers::spaces::list_spaces))
        .route("/api/spaces/:id", get(handlers::spaces::get_space))
        .route(
            "/api/spaces/:id/availability",
            get(handlers::spaces::get_availability),
        )
        .route(
            "/api/spaces/:id/reviews",
            get(handlers::reviews::list_reviews),
        )
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route("/api/favorites", get(handlers::auth::list_favorites))
        .route(
            "/api/favorites/:space_id/toggle",
            post(handlers::auth::toggle_favorite),
        )
        .route(
            "/api/host/spaces",
            get(handlers::host::list_host_spaces).post(handlers::host::create_space),
        )
        .route("/api/host/bookings", get(handlers::host::list_host_bookings))
        .route(
            "/api/host/spaces/:id/availability",
            put(handlers::host::update_availability),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
