use log::info;

mod app;
mod chat;
mod client;
mod game;
mod http;
mod jwt;
mod league;
mod logs;
mod persistence;
mod player;
mod protocol;
mod seed;
mod team;
mod trade;
mod user;
mod util;

pub use app::{AppState, ServiceError, ServiceResult};

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    logs::init_logger();

    let app = app::construct_app();

    info!("Starting application");

    http::run(app, shutdown_signal()).await;
}
