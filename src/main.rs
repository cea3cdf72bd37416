use sea_orm::Database;
use tokio::sync::mpsc;
use tracing::info;

use gatekey::config::GatekeyConfig;
use gatekey::infra::notify::{HttpMailer, QueueNotifier, run_worker};
use gatekey::router::build_router;
use gatekey::state::AppState;
use gatekey::telemetry::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = GatekeyConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run_worker(rx, HttpMailer::new(config.notify_url.clone())));

    let state = AppState {
        db,
        redis,
        notifier: QueueNotifier { tx },
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("gatekey listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
