use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    AppState, ServiceResult,
    game::{Game, GameId, GameService},
    jwt::Claims,
    league::LeagueId,
    team::TeamId,
    user::UserService,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateGamePayload {
    pub league_id: LeagueId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
}

pub async fn simulate_game(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<SimulateGamePayload>,
) -> ServiceResult<Json<Game>> {
    state.user_service.fetch_user_by_username(&claims.sub)?;
    let game = state.game_service.simulate(
        payload.league_id,
        payload.home_team_id,
        payload.away_team_id,
    )?;
    Ok(Json(game))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> ServiceResult<Json<Game>> {
    Ok(Json(state.game_service.fetch_game(id)?))
}
