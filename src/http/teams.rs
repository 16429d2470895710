use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, ServiceResult,
    player::{Player, PlayerId, PlayerService},
    team::{Team, TeamId, TeamService},
    user::{UserId, UserService},
};

pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> ServiceResult<Json<Team>> {
    Ok(Json(state.team_service.fetch_team(id)?))
}

pub async fn get_team_players(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> ServiceResult<Json<Vec<Player>>> {
    Ok(Json(state.player_service.players_by_team(id)?))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
) -> ServiceResult<Json<Player>> {
    Ok(Json(state.player_service.fetch_player(id)?))
}

pub async fn get_user_teams(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> ServiceResult<Json<Vec<Team>>> {
    state.user_service.fetch_user(id)?;
    Ok(Json(state.team_service.teams_by_gm(id)))
}
