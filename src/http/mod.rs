use axum::{
    Router,
    routing::{any, get, post},
};
use log::info;
use tower_http::cors::CorsLayer;

use crate::{AppState, client};

mod auth;
mod games;
mod leagues;
mod teams;
mod trades;

pub fn router() -> Router<AppState> {
    let api = Router::new()
        .route("/auth/login", post(auth::handle_login))
        .route("/auth/register", post(auth::handle_register))
        .route(
            "/leagues",
            get(leagues::get_leagues).post(leagues::create_league),
        )
        .route("/leagues/{id}", get(leagues::get_league))
        .route(
            "/leagues/{id}/teams",
            get(leagues::get_league_teams).post(leagues::create_league_team),
        )
        .route("/leagues/{id}/standings", get(leagues::get_standings))
        .route("/leagues/{id}/players", get(leagues::get_league_players))
        .route("/leagues/{id}/games", get(leagues::get_league_games))
        .route("/leagues/{id}/chat", get(leagues::get_league_chat))
        .route("/users/{id}/teams", get(teams::get_user_teams))
        .route("/teams/{id}", get(teams::get_team))
        .route("/teams/{id}/players", get(teams::get_team_players))
        .route("/teams/{id}/trades", get(trades::get_team_trades))
        .route("/players/{id}", get(teams::get_player))
        .route("/trades", post(trades::create_trade))
        .route("/trades/{id}/respond", post(trades::respond_trade))
        .route("/games/simulate", post(games::simulate_game))
        .route("/games/{id}", get(games::get_game));

    Router::new()
        .nest("/api", api)
        .route("/ws", any(client::ws_handler))
        .layer(CorsLayer::permissive())
}

pub async fn run(
    state: AppState,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) {
    let port = std::env::var("RINK_PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
        .expect("RINK_PORT must be a valid u16");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind server port");

    info!("Server listening on port {}", port);
    axum::serve(listener, router().with_state(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .expect("Server crashed");

    info!("Server shut down gracefully");
}
