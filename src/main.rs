use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use friendsocial::config::AppConfig;
use friendsocial::database;
use friendsocial::services::scheduled_activity_service::ScheduledActivityService;
use friendsocial::web::{self, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("DATABASE_URL must be set (environment or .env)");
    info!(database_url = %config.database_url, "connecting to database");

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("DATABASE_URL is not a valid SQLite URL")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options)
        .await
        .expect("cannot connect to database");

    database::run_migrations(&pool)
        .await
        .expect("cannot apply database migrations");

    let scheduling = ScheduledActivityService::with_sqlite_lookups(pool.clone());
    let app = web::router(AppState::new(pool, scheduling))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("cannot parse HOST/PORT");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback: SocketAddr = format!("{}:{}", config.host, config.port.saturating_add(1))
                .parse()
                .expect("cannot parse fallback HOST/PORT");
            warn!(%addr, %fallback, error = %e, "bind failed, trying fallback port");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("cannot bind fallback port")
        }
    };

    match listener.local_addr() {
        Ok(bound) => info!("listening on http://{}", bound),
        Err(e) => warn!(error = %e, "cannot read bound address"),
    }

    axum::serve(listener, app).await.expect("server error");
}
