use axum::http::{HeaderValue, Method, header};
use invito::core::{AppState, Config, db};
use invito::create_router;
use invito::storage::{LocalMediaStore, UPLOADS_ROUTE};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging: livello da RUST_LOG, default info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,invito=debug,sqlx=warn")),
        )
        .init();

    // Inizializza la configurazione
    let config = Config::from_env()?;
    config.print_info();

    // Database + migrazioni
    let pool = db::connect(&config).await?;
    db::run_migrations(&pool).await?;

    let media_store = Arc::new(LocalMediaStore::new(config.upload_dir.clone()));
    let state = Arc::new(
        AppState::new(pool, config.jwt_secret.clone(), media_store)
            .with_dev_token(config.enable_dev_token),
    );

    let cors = match &config.allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
        None => CorsLayer::permissive(),
    };

    let app = create_router(state)
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.upload_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
